//! Heading-aware segmentation engine.
//!
//! Splits a policy's text into segments aligned to its own heading
//! hierarchy (Markdown ATX headings and Chinese legal numbering such as
//! `第一章` / `第一条`), then bounds each segment to a character budget
//! without losing or duplicating any text.

mod bound;
mod heading;
mod hierarchy;
mod strategies;
mod types;

pub use bound::bound_segment;
pub use heading::{classify, classify_detailed, HeadingMatch, MAX_HEADING_LEVEL};
pub use hierarchy::{split_hierarchy, split_lines};
pub use strategies::{merge_chunks, segment_text};
pub use types::{Chunk, ChunkConfig, RawSegment};
