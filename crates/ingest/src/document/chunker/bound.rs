//! Character-budget splitting of raw segments.

use super::types::{Chunk, ChunkConfig, RawSegment};

/// Split `segment` into chunks of at most `config.max_chunk_size` characters.
///
/// Sizes count Unicode scalar values, so a multi-byte character is never cut.
/// Within each window the cut goes right after the last newline (the newline
/// stays with the emitted chunk); a window without a newline is hard-cut at
/// exactly `max_chunk_size` characters. Concatenating the returned chunks
/// yields `segment.content` unchanged.
pub fn bound_segment(segment: &RawSegment, config: &ChunkConfig) -> Vec<Chunk> {
    let max = config.max_chunk_size.max(1);
    let title = segment.title.as_str();
    let level = segment.level;

    let mut chunks = Vec::new();
    let mut rest = segment.content.as_str();

    // Byte offset of the character just past the window, if `rest` is over budget.
    while let Some((window_end, _)) = rest.char_indices().nth(max) {
        let window = &rest[..window_end];
        let cut = match window.rfind('\n') {
            Some(nl) => nl + 1,
            None => window_end,
        };
        chunks.push(Chunk::new(title, level, &rest[..cut], chunks.len()));
        rest = &rest[cut..];
    }

    if !rest.is_empty() || chunks.is_empty() {
        chunks.push(Chunk::new(title, level, rest, chunks.len()));
    }
    chunks
}
