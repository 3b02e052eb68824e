//! Knowledge-base export: segments policy documents and renders them as
//! Markdown, JSON or plain text alongside a `rag_metadata.json` sidecar.

pub mod bundle;
pub mod error;
pub mod exporter;
pub mod observer;
pub mod render;
pub mod types;
mod writer;

pub use bundle::{BundleExportResult, BundleFile, BundleLimits, BundleReport};
pub use error::{ExportError, ExportStage};
pub use exporter::{segment_document, CancellationToken, ExportOptions, Exporter};
pub use observer::{ExportObserver, NoopObserver, TracingObserver};
pub use types::{ExportFormat, ExportResult, ExportSegment, OutputFile, PolicySegments};
