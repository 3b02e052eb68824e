//! Export orchestration: segmentation fan-out, id assignment, rendering and
//! artifact writes.

use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Local};
use rayon::prelude::*;

use policykb_core::config::{ExportConfig, DEFAULT_KB_TITLE, DEFAULT_MAX_CHUNK_SIZE};
use policykb_core::Document;
use policykb_ingest::{segment_text, ChunkConfig};

use crate::error::ExportError;
use crate::observer::{ExportObserver, TracingObserver};
use crate::render::json::to_pretty_json;
use crate::render::{render_knowledge_base, RenderContext};
use crate::types::{
    segment_id, ExportFormat, ExportResult, ExportSegment, OutputFile, PolicySegments, RagMetadata,
    METADATA_FILENAME,
};
use crate::writer::{ensure_dir, write_artifact};

// ── Options ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Character budget per chunk. Zero is rejected with
    /// [`ExportError::InvalidChunkSize`].
    pub max_chunk_size: usize,
    /// Segmentation threads. 1 segments on the calling thread.
    pub workers: usize,
    pub knowledge_base_title: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
            workers: 1,
            knowledge_base_title: DEFAULT_KB_TITLE.to_string(),
        }
    }
}

impl From<&ExportConfig> for ExportOptions {
    fn from(cfg: &ExportConfig) -> Self {
        Self {
            max_chunk_size: cfg.max_chunk_size,
            workers: cfg.workers,
            knowledge_base_title: cfg.knowledge_base_title.clone(),
        }
    }
}

// ── Cancellation ────────────────────────────────────────────────────

/// Cooperative cancellation flag, checked between documents.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

// ── Exporter ────────────────────────────────────────────────────────

pub struct Exporter {
    options: ExportOptions,
    observer: Arc<dyn ExportObserver>,
    cancel: Option<CancellationToken>,
}

impl Exporter {
    pub fn new(options: ExportOptions) -> Self {
        Self {
            options,
            observer: Arc::new(TracingObserver),
            cancel: None,
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn ExportObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    pub(crate) fn observer(&self) -> &dyn ExportObserver {
        self.observer.as_ref()
    }

    fn chunk_config(&self) -> ChunkConfig {
        ChunkConfig {
            max_chunk_size: self.options.max_chunk_size,
        }
    }

    /// Segment every document, returning policies in input order.
    ///
    /// With `workers > 1` documents are segmented on a dedicated rayon pool;
    /// the indexed collect keeps input order, so ids and output are the
    /// same for any worker count.
    pub fn segment(&self, documents: &[Document]) -> Result<Vec<PolicySegments>, ExportError> {
        if self.options.max_chunk_size == 0 {
            return Err(ExportError::InvalidChunkSize);
        }
        let total = documents.len();
        let completed = AtomicUsize::new(0);
        let config = self.chunk_config();

        let run_one = |(i, doc): (usize, &Document)| -> Result<PolicySegments, ExportError> {
            if self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
                return Err(ExportError::Cancelled {
                    next_document: i + 1,
                    completed: completed.load(Ordering::Relaxed),
                    total,
                });
            }
            let policy = segment_document(i + 1, doc, &config);
            self.observer
                .document_segmented(policy.policy_index, &policy.info.title, policy.segments.len());
            completed.fetch_add(1, Ordering::Relaxed);
            Ok(policy)
        };

        if self.options.workers <= 1 {
            documents.iter().enumerate().map(run_one).collect()
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.options.workers)
                .build()?;
            pool.install(|| documents.par_iter().enumerate().map(run_one).collect())
        }
    }

    /// Export `documents` into `output_dir` as a single `rag_knowledge_base`
    /// file plus `rag_metadata.json`.
    pub fn export(
        &self,
        documents: &[Document],
        format: ExportFormat,
        output_dir: &Path,
    ) -> Result<ExportResult, ExportError> {
        self.export_at(documents, format, output_dir, Local::now())
    }

    /// [`export`](Self::export) with an explicit export timestamp.
    pub fn export_at(
        &self,
        documents: &[Document],
        format: ExportFormat,
        output_dir: &Path,
        exported_at: DateTime<Local>,
    ) -> Result<ExportResult, ExportError> {
        self.observer.export_started(documents.len(), format);

        let policies = self.segment(documents)?;
        let total_segments: usize = policies.iter().map(|p| p.segments.len()).sum();

        let ctx = self.render_context(exported_at);
        let body = render_knowledge_base(format, &policies, &ctx)?;

        ensure_dir(output_dir)?;
        let filename = format.knowledge_base_filename();
        let filepath = output_dir.join(&filename);
        let bytes = write_artifact(&filepath, &body)?;
        self.observer.artifact_written(&filepath, bytes);

        let output_files = vec![OutputFile {
            filename,
            filepath,
            segment_count: total_segments,
            policy_count: policies.len(),
        }];

        let metadata_file = self.write_metadata(&policies, format, output_dir, &ctx, &output_files)?;

        self.observer
            .export_finished(policies.len(), total_segments, &metadata_file);

        Ok(ExportResult {
            output_dir: output_dir.to_path_buf(),
            output_files,
            metadata_file,
            total_policies: policies.len(),
            total_segments,
        })
    }

    pub(crate) fn render_context(&self, exported_at: DateTime<Local>) -> RenderContext<'_> {
        RenderContext {
            knowledge_base_title: &self.options.knowledge_base_title,
            exported_at,
            max_chunk_size: self.options.max_chunk_size,
        }
    }

    /// Write `rag_metadata.json`, enumerating every segment.
    pub(crate) fn write_metadata(
        &self,
        policies: &[PolicySegments],
        format: ExportFormat,
        output_dir: &Path,
        ctx: &RenderContext<'_>,
        output_files: &[OutputFile],
    ) -> Result<std::path::PathBuf, ExportError> {
        let segments: Vec<&ExportSegment> = policies.iter().flat_map(|p| &p.segments).collect();
        let metadata = RagMetadata {
            export_time: ctx.iso_time(),
            total_policies: policies.len(),
            total_segments: segments.len(),
            format_type: format.as_str(),
            max_chunk_size: ctx.max_chunk_size,
            segments,
            output_files,
        };
        let json = to_pretty_json(&metadata, METADATA_FILENAME)?;

        let path = output_dir.join(METADATA_FILENAME);
        let bytes = write_artifact(&path, &json)?;
        self.observer.artifact_written(&path, bytes);
        Ok(path)
    }
}

/// Segment one document into export segments numbered
/// `policy_{policy_index}_segment_{k}`, k counting from 1 in emission order.
pub fn segment_document(policy_index: usize, doc: &Document, config: &ChunkConfig) -> PolicySegments {
    let info = doc.resolve();
    let segments = segment_text(&info.content, config)
        .into_iter()
        .enumerate()
        .map(|(k, chunk)| ExportSegment {
            segment_id: segment_id(policy_index, k + 1),
            policy_id: policy_index,
            document_id: info.id.clone(),
            policy_title: info.title.clone(),
            policy_date: info.pub_date.clone(),
            policy_level: info.level.clone(),
            policy_source: info.source.clone(),
            chunk,
        })
        .collect();

    PolicySegments {
        policy_index,
        info,
        segments,
    }
}
