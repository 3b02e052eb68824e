//! Chunk configuration and output types.

use serde::{Deserialize, Serialize};

use policykb_core::config::DEFAULT_MAX_CHUNK_SIZE;

// ── Configuration ───────────────────────────────────────────────────────────

/// Configuration for the chunking engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkConfig {
    /// Maximum characters (Unicode scalar values) per chunk (default: 4096).
    pub max_chunk_size: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
        }
    }
}

// ── Segments ────────────────────────────────────────────────────────────────

/// Text between two heading-detection events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSegment {
    /// The heading line verbatim; empty for pre-heading content.
    pub title: String,
    /// 0 for pre-heading content, otherwise 1..=6.
    pub level: u8,
    /// Lines of the segment (heading line included) joined with `\n`.
    pub content: String,
}

// ── Chunk output ────────────────────────────────────────────────────────────

/// A raw segment, or a piece of one, after size bounding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub title: String,
    pub level: u8,
    pub content: String,
    /// Character count of `content`.
    pub size: usize,
    /// 0-based position of this chunk inside its raw segment.
    #[serde(skip)]
    pub part: usize,
}

impl Chunk {
    pub(crate) fn new(title: &str, level: u8, content: &str, part: usize) -> Self {
        Self {
            title: title.to_string(),
            level,
            content: content.to_string(),
            size: content.chars().count(),
            part,
        }
    }
}
