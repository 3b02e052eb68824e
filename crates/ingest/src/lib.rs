//! Document intake and syntactic segmentation for policy knowledge bases.

pub mod clean;
pub mod document;

pub use clean::clean_content;
pub use document::chunker::{segment_text, Chunk, ChunkConfig, RawSegment};
pub use document::{extract_documents, DocumentError, ExtractedBatch, ExtractionError, RejectedRecord};
