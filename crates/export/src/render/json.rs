use serde::Serialize;

use policykb_ingest::clean_content;

use super::{total_segments, RenderContext};
use crate::error::ExportError;
use crate::types::{ExportSegment, PolicySegments};

#[derive(Serialize)]
struct KnowledgeBase<'a> {
    export_time: String,
    total_policies: usize,
    total_segments: usize,
    format_type: &'static str,
    max_chunk_size: usize,
    policies: Vec<PolicyEntry<'a>>,
}

#[derive(Serialize)]
struct PolicyEntry<'a> {
    policy_id: usize,
    document_id: &'a str,
    title: &'a str,
    date: &'a str,
    level: &'a str,
    source: &'a str,
    segments: Vec<SegmentEntry<'a>>,
    /// All chunks merged back and cleaned.
    content: String,
}

#[derive(Serialize)]
struct SegmentEntry<'a> {
    segment_id: &'a str,
    title: &'a str,
    level: u8,
    content: String,
    size: usize,
}

impl<'a> SegmentEntry<'a> {
    fn from_segment(segment: &'a ExportSegment) -> Self {
        let content = clean_content(&segment.chunk.content);
        Self {
            segment_id: &segment.segment_id,
            title: &segment.chunk.title,
            level: segment.chunk.level,
            size: content.chars().count(),
            content,
        }
    }
}

/// Per-segment JSON: chunk boundaries are preserved, unlike Markdown/Text.
pub fn render_knowledge_base(
    policies: &[PolicySegments],
    ctx: &RenderContext<'_>,
) -> Result<String, ExportError> {
    let kb = KnowledgeBase {
        export_time: ctx.iso_time(),
        total_policies: policies.len(),
        total_segments: total_segments(policies),
        format_type: "json",
        max_chunk_size: ctx.max_chunk_size,
        policies: policies
            .iter()
            .map(|p| PolicyEntry {
                policy_id: p.policy_index,
                document_id: &p.info.id,
                title: &p.info.title,
                date: &p.info.pub_date,
                level: &p.info.level,
                source: &p.info.source,
                segments: p.segments.iter().map(SegmentEntry::from_segment).collect(),
                content: p.merged_content(),
            })
            .collect(),
    };
    to_pretty_json(&kb, "rag_knowledge_base.json")
}

#[derive(Serialize)]
struct SegmentFile<'a> {
    segment_id: &'a str,
    title: &'a str,
    content: String,
    level: u8,
    policy_info: PolicyInfoEntry<'a>,
    metadata: SegmentFileMeta,
}

#[derive(Serialize)]
struct PolicyInfoEntry<'a> {
    level: &'a str,
    title: &'a str,
    pub_date: &'a str,
    source: &'a str,
}

#[derive(Serialize)]
struct SegmentFileMeta {
    chunk_size: usize,
    export_time: String,
    chunk_num: usize,
    segment_num: usize,
}

pub fn render_segment_file(
    segment: &ExportSegment,
    bundle_num: usize,
    segment_num: usize,
    ctx: &RenderContext<'_>,
) -> Result<String, ExportError> {
    let file = SegmentFile {
        segment_id: &segment.segment_id,
        title: &segment.chunk.title,
        content: clean_content(&segment.chunk.content),
        level: segment.chunk.level,
        policy_info: PolicyInfoEntry {
            level: &segment.policy_level,
            title: &segment.policy_title,
            pub_date: &segment.policy_date,
            source: &segment.policy_source,
        },
        metadata: SegmentFileMeta {
            chunk_size: segment.chunk.size,
            export_time: ctx.iso_time(),
            chunk_num: bundle_num,
            segment_num,
        },
    };
    to_pretty_json(&file, &segment.segment_id)
}

pub(crate) fn to_pretty_json<T: Serialize>(value: &T, artifact: &str) -> Result<String, ExportError> {
    serde_json::to_string_pretty(value).map_err(|source| ExportError::Render {
        artifact: artifact.to_string(),
        source,
    })
}
