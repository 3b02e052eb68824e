//! Heading-driven splitting of a document into raw segments.

use super::heading::classify;
use super::types::RawSegment;

/// Split `content` on `\n` and group the lines by heading.
pub fn split_lines(content: &str) -> Vec<RawSegment> {
    split_hierarchy(content.split('\n'))
}

/// Group ordered lines into raw segments, one per detected heading.
///
/// Each heading line opens a new segment and becomes its title; the line
/// itself stays in the segment's content. Lines before the first heading
/// form a level-0 segment with an empty title. The final buffer is always
/// flushed, so an empty input still yields one (empty) segment.
///
/// Joining every segment's content with `\n` reproduces the input lines.
pub fn split_hierarchy<'a, I>(lines: I) -> Vec<RawSegment>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut segments = Vec::new();
    let mut buffer: Vec<&str> = Vec::new();
    let mut title = String::new();
    let mut level = 0u8;

    for line in lines {
        let heading_level = classify(line);
        if heading_level > 0 {
            // Nothing to flush before a leading heading.
            if !buffer.is_empty() {
                segments.push(RawSegment {
                    title: std::mem::take(&mut title),
                    level,
                    content: buffer.join("\n"),
                });
                buffer.clear();
            }
            buffer.push(line);
            title = line.to_string();
            level = heading_level;
        } else {
            buffer.push(line);
        }
    }

    segments.push(RawSegment {
        title,
        level,
        content: buffer.join("\n"),
    });
    segments
}
