use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Pipeline stage an export failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStage {
    Segmentation,
    Rendering,
    Writing,
}

impl fmt::Display for ExportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportStage::Segmentation => write!(f, "segmentation"),
            ExportStage::Rendering => write!(f, "rendering"),
            ExportStage::Writing => write!(f, "write"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("segmentation: failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error("segmentation: max_chunk_size must be positive")]
    InvalidChunkSize,

    /// `next_document` is the 1-based index of the document that was not segmented.
    #[error("segmentation: export cancelled at document {next_document} ({completed} of {total} done)")]
    Cancelled {
        next_document: usize,
        completed: usize,
        total: usize,
    },

    #[error("rendering: failed to render {artifact}: {source}")]
    Render {
        artifact: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("write: failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    pub fn stage(&self) -> ExportStage {
        match self {
            ExportError::WorkerPool(_)
            | ExportError::InvalidChunkSize
            | ExportError::Cancelled { .. } => ExportStage::Segmentation,
            ExportError::Render { .. } => ExportStage::Rendering,
            ExportError::Write { .. } => ExportStage::Writing,
        }
    }
}
