//! Renderers for the aggregate knowledge-base file and per-segment bundle files.

pub mod json;
pub mod markdown;
pub mod text;

use chrono::{DateTime, Local};

use crate::error::ExportError;
use crate::types::{ExportFormat, ExportSegment, PolicySegments};

/// Export-wide values shared by all renderers.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    pub knowledge_base_title: &'a str,
    pub exported_at: DateTime<Local>,
    pub max_chunk_size: usize,
}

impl RenderContext<'_> {
    /// Human-readable export time used in document headers.
    pub fn display_time(&self) -> String {
        self.exported_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// ISO-8601 export time used in JSON artifacts.
    pub fn iso_time(&self) -> String {
        self.exported_at.to_rfc3339()
    }
}

/// Render the single aggregate file for `format`.
pub fn render_knowledge_base(
    format: ExportFormat,
    policies: &[PolicySegments],
    ctx: &RenderContext<'_>,
) -> Result<String, ExportError> {
    match format {
        ExportFormat::Markdown => Ok(markdown::render_knowledge_base(policies, ctx)),
        ExportFormat::Text => Ok(text::render_knowledge_base(policies, ctx)),
        ExportFormat::Json => json::render_knowledge_base(policies, ctx),
    }
}

/// Render one bundle file holding a single segment.
pub fn render_segment_file(
    format: ExportFormat,
    segment: &ExportSegment,
    bundle_num: usize,
    segment_num: usize,
    ctx: &RenderContext<'_>,
) -> Result<String, ExportError> {
    match format {
        ExportFormat::Markdown => Ok(markdown::render_segment_file(segment)),
        ExportFormat::Text => Ok(text::render_segment_file(segment)),
        ExportFormat::Json => json::render_segment_file(segment, bundle_num, segment_num, ctx),
    }
}

pub(crate) fn total_segments(policies: &[PolicySegments]) -> usize {
    policies.iter().map(|p| p.segments.len()).sum()
}

/// Heading for a segment file: the chunk's own heading, or the policy
/// title for pre-heading content.
pub(crate) fn segment_heading(segment: &ExportSegment) -> &str {
    let title = segment.chunk.title.trim();
    if title.is_empty() {
        &segment.policy_title
    } else {
        title
    }
}
