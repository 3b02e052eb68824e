pub mod chunker;
mod json;
mod jsonl;

use policykb_core::Document;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("input is not valid UTF-8 (first invalid byte at offset {offset})")]
    Encoding { offset: usize },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a single record was skipped.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("record {position} is not valid UTF-8")]
    Encoding { position: usize },
    #[error("record {position} is malformed: {reason}")]
    Malformed { position: usize, reason: String },
}

/// A record that could not be turned into a [`Document`].
#[derive(Debug)]
pub struct RejectedRecord {
    /// 1-based line number (JSON Lines) or array index (JSON).
    pub position: usize,
    pub error: DocumentError,
}

/// Documents loaded from one input file, plus the records that were skipped.
#[derive(Debug, Default)]
pub struct ExtractedBatch {
    pub documents: Vec<Document>,
    pub rejected: Vec<RejectedRecord>,
}

impl ExtractedBatch {
    pub(crate) fn reject(&mut self, error: DocumentError) {
        let position = match &error {
            DocumentError::Encoding { position } | DocumentError::Malformed { position, .. } => {
                *position
            }
        };
        tracing::warn!(position, error = %error, "skipping policy record");
        self.rejected.push(RejectedRecord { position, error });
    }
}

/// Load policy documents from file bytes based on file type.
///
/// A bad record never aborts the batch; it is reported in
/// [`ExtractedBatch::rejected`] and the remaining records are still loaded.
pub fn extract_documents(bytes: &[u8], filename: &str) -> Result<ExtractedBatch, ExtractionError> {
    let ext = filename.rsplit('.').next().unwrap_or("").to_lowercase();

    let batch = match ext.as_str() {
        "jsonl" | "ndjson" => jsonl::extract_jsonl(bytes),
        "json" => json::extract_json(bytes)?,
        other => return Err(ExtractionError::UnsupportedType(other.to_string())),
    };

    tracing::info!(
        filename,
        documents = batch.documents.len(),
        rejected = batch.rejected.len(),
        "loaded policy documents"
    );
    Ok(batch)
}

fn object_to_document(value: serde_json::Value, position: usize) -> Result<Document, DocumentError> {
    if !value.is_object() {
        return Err(DocumentError::Malformed {
            position,
            reason: "expected a JSON object".to_string(),
        });
    }
    serde_json::from_value(value).map_err(|e| DocumentError::Malformed {
        position,
        reason: e.to_string(),
    })
}
