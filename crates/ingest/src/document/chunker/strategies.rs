//! Whole-document segmentation and the inverse merge.

use super::bound::bound_segment;
use super::hierarchy::split_lines;
use super::types::{Chunk, ChunkConfig};

/// Segment a document body: split by heading hierarchy, then bound each
/// raw segment. Chunks come back in original line order.
pub fn segment_text(content: &str, config: &ChunkConfig) -> Vec<Chunk> {
    split_lines(content)
        .iter()
        .flat_map(|segment| bound_segment(segment, config))
        .collect()
}

/// Reassemble a document body from its chunks.
///
/// The first chunk of each raw segment is joined with `\n`; continuation
/// chunks are appended directly, since the bounding split keeps cut
/// newlines inside the chunk.
pub fn merge_chunks<'a, I>(chunks: I) -> String
where
    I: IntoIterator<Item = &'a Chunk>,
{
    let mut merged = String::new();
    for (i, chunk) in chunks.into_iter().enumerate() {
        if i > 0 && chunk.part == 0 {
            merged.push('\n');
        }
        merged.push_str(&chunk.content);
    }
    merged
}
