//! Progress/observability hooks injected into the [`Exporter`](crate::Exporter).

use std::path::Path;

use tracing::{debug, info};

use crate::types::ExportFormat;

/// Receives export progress events. Called from segmentation worker
/// threads, so implementations must be thread-safe.
pub trait ExportObserver: Send + Sync {
    fn export_started(&self, _documents: usize, _format: ExportFormat) {}

    fn document_segmented(&self, _policy_index: usize, _title: &str, _segments: usize) {}

    fn artifact_written(&self, _path: &Path, _bytes: u64) {}

    fn bundle_written(&self, _bundle_index: usize, _files: usize, _bytes: u64) {}

    fn export_finished(&self, _policies: usize, _segments: usize, _metadata_file: &Path) {}
}

/// Emits `tracing` events for every hook.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ExportObserver for TracingObserver {
    fn export_started(&self, documents: usize, format: ExportFormat) {
        info!(documents, format = %format, "RAG export started");
    }

    fn document_segmented(&self, policy_index: usize, title: &str, segments: usize) {
        debug!(policy_index, title, segments, "policy segmented");
    }

    fn artifact_written(&self, path: &Path, bytes: u64) {
        info!(path = %path.display(), bytes, "artifact written");
    }

    fn bundle_written(&self, bundle_index: usize, files: usize, bytes: u64) {
        debug!(bundle = bundle_index, files, bytes, "bundle written");
    }

    fn export_finished(&self, policies: usize, segments: usize, metadata_file: &Path) {
        info!(
            policies,
            segments,
            metadata = %metadata_file.display(),
            "RAG export finished"
        );
    }
}

/// Ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ExportObserver for NoopObserver {}
