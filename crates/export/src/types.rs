use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use policykb_core::PolicyInfo;
use policykb_ingest::document::chunker::merge_chunks;
use policykb_ingest::{clean_content, Chunk};

pub const METADATA_FILENAME: &str = "rag_metadata.json";

/// Output rendering of the aggregate knowledge-base file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Markdown,
    Json,
    Text,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Json => "json",
            ExportFormat::Text => "txt",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "markdown",
            ExportFormat::Json => "json",
            ExportFormat::Text => "text",
        }
    }

    /// `rag_knowledge_base.{md,json,txt}`
    pub fn knowledge_base_filename(&self) -> String {
        format!("rag_knowledge_base.{}", self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "json" => Ok(ExportFormat::Json),
            "text" | "txt" => Ok(ExportFormat::Text),
            other => Err(format!("unknown export format '{other}' (expected markdown, json or text)")),
        }
    }
}

/// A chunk enriched with its policy's metadata and a stable identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSegment {
    /// `policy_{policy_index}_segment_{chunk_index}`, both 1-based.
    pub segment_id: String,
    /// 1-based position of the policy in the export input.
    pub policy_id: usize,
    /// The source record's own id (empty when the record had none).
    pub document_id: String,
    pub policy_title: String,
    pub policy_date: String,
    pub policy_level: String,
    pub policy_source: String,
    #[serde(flatten)]
    pub chunk: Chunk,
}

pub fn segment_id(policy_index: usize, chunk_index: usize) -> String {
    format!("policy_{policy_index}_segment_{chunk_index}")
}

/// All segments of one policy, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicySegments {
    pub policy_index: usize,
    pub info: PolicyInfo,
    pub segments: Vec<ExportSegment>,
}

impl PolicySegments {
    /// The policy body rebuilt from its chunks, then cleaned.
    pub fn merged_content(&self) -> String {
        clean_content(&merge_chunks(self.segments.iter().map(|s| &s.chunk)))
    }
}

/// One artifact written by an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputFile {
    pub filename: String,
    pub filepath: PathBuf,
    pub segment_count: usize,
    pub policy_count: usize,
}

/// Outcome of [`Exporter::export`](crate::Exporter::export).
#[derive(Debug, Clone)]
pub struct ExportResult {
    pub output_dir: PathBuf,
    pub output_files: Vec<OutputFile>,
    pub metadata_file: PathBuf,
    pub total_policies: usize,
    pub total_segments: usize,
}

/// Schema of `rag_metadata.json`.
#[derive(Debug, Serialize)]
pub(crate) struct RagMetadata<'a> {
    pub export_time: String,
    pub total_policies: usize,
    pub total_segments: usize,
    pub format_type: &'static str,
    pub max_chunk_size: usize,
    pub segments: Vec<&'a ExportSegment>,
    pub output_files: &'a [OutputFile],
}
