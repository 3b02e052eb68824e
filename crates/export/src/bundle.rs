//! Bundled export: one file per segment, packed into `chunk_NNN`
//! directories that stay under a file-count and byte budget, for knowledge
//! bases that cap upload size per batch.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::{DateTime, Local};
use regex::Regex;
use serde::Serialize;

use policykb_core::config::BundleConfig;
use policykb_core::Document;

use crate::error::ExportError;
use crate::exporter::Exporter;
use crate::render::render_segment_file;
use crate::types::{ExportFormat, ExportSegment, OutputFile};
use crate::writer::{ensure_dir, write_artifact};

const SAFE_TITLE_CHARS: usize = 50;

static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("valid filename pattern"));
static SEPARATOR_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]+").expect("valid separator pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundleLimits {
    pub max_files_per_bundle: usize,
    /// Budget over the UTF-8 bytes of segment content.
    pub max_bundle_bytes: u64,
}

impl Default for BundleLimits {
    fn default() -> Self {
        Self::from(&BundleConfig::default())
    }
}

impl From<&BundleConfig> for BundleLimits {
    fn from(cfg: &BundleConfig) -> Self {
        Self {
            max_files_per_bundle: cfg.max_files_per_bundle,
            max_bundle_bytes: cfg.max_bundle_bytes(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleFile {
    pub filename: String,
    pub size_bytes: u64,
    pub title: String,
    pub policy_title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleReport {
    /// 1-based.
    pub bundle_index: usize,
    pub dir: PathBuf,
    pub files: Vec<BundleFile>,
    pub total_size_bytes: u64,
}

#[derive(Debug, Clone)]
pub struct BundleExportResult {
    pub bundles: Vec<BundleReport>,
    pub metadata_file: PathBuf,
    pub total_policies: usize,
    pub total_segments: usize,
}

/// Greedily pack segments, in order, into bundles.
///
/// A bundle is closed when the next segment would push it past either
/// limit; a segment larger than the byte budget still gets a bundle of its
/// own.
pub fn plan_bundles<'a>(segments: &[&'a ExportSegment], limits: &BundleLimits) -> Vec<Vec<&'a ExportSegment>> {
    let max_files = limits.max_files_per_bundle.max(1);
    let mut bundles = Vec::new();
    let mut current: Vec<&ExportSegment> = Vec::new();
    let mut current_bytes = 0u64;

    for &segment in segments {
        let size = segment.chunk.content.len() as u64;
        let full = current.len() >= max_files || current_bytes + size > limits.max_bundle_bytes;
        if full && !current.is_empty() {
            bundles.push(std::mem::take(&mut current));
            current_bytes = 0;
        }
        current.push(segment);
        current_bytes += size;
    }
    if !current.is_empty() {
        bundles.push(current);
    }
    bundles
}

/// Filesystem-safe form of a policy title (first 50 characters).
pub fn safe_title(title: &str) -> String {
    let head: String = title.chars().take(SAFE_TITLE_CHARS).collect();
    let stripped = UNSAFE_CHARS.replace_all(&head, "");
    SEPARATOR_RUNS
        .replace_all(stripped.trim(), "-")
        .into_owned()
}

impl Exporter {
    /// Export one file per segment into size-limited bundle directories,
    /// plus `rag_metadata.json` at the root of `output_dir`.
    pub fn export_bundles(
        &self,
        documents: &[Document],
        format: ExportFormat,
        output_dir: &Path,
        limits: &BundleLimits,
    ) -> Result<BundleExportResult, ExportError> {
        self.export_bundles_at(documents, format, output_dir, limits, Local::now())
    }

    pub fn export_bundles_at(
        &self,
        documents: &[Document],
        format: ExportFormat,
        output_dir: &Path,
        limits: &BundleLimits,
        exported_at: DateTime<Local>,
    ) -> Result<BundleExportResult, ExportError> {
        self.observer().export_started(documents.len(), format);

        let policies = self.segment(documents)?;
        let segments: Vec<&ExportSegment> = policies.iter().flat_map(|p| &p.segments).collect();
        let plan = plan_bundles(&segments, limits);
        let ctx = self.render_context(exported_at);

        ensure_dir(output_dir)?;
        let mut bundles = Vec::with_capacity(plan.len());
        let mut output_files = Vec::with_capacity(segments.len());

        for (b, bundle_segments) in plan.iter().enumerate() {
            let bundle_num = b + 1;
            let dir = output_dir.join(format!("chunk_{bundle_num:03}"));
            ensure_dir(&dir)?;

            let mut files = Vec::with_capacity(bundle_segments.len());
            let mut total_size_bytes = 0u64;

            for (s, segment) in bundle_segments.iter().enumerate() {
                let segment_num = s + 1;
                let filename = format!(
                    "{bundle_num:03}_{segment_num:03}_{}.{}",
                    safe_title(&segment.policy_title),
                    format.extension()
                );
                let body = render_segment_file(format, segment, bundle_num, segment_num, &ctx)?;
                let filepath = dir.join(&filename);
                let size_bytes = write_artifact(&filepath, &body)?;
                self.observer().artifact_written(&filepath, size_bytes);

                total_size_bytes += size_bytes;
                files.push(BundleFile {
                    filename: filename.clone(),
                    size_bytes,
                    title: segment.chunk.title.clone(),
                    policy_title: segment.policy_title.clone(),
                });
                output_files.push(OutputFile {
                    filename: format!("chunk_{bundle_num:03}/{filename}"),
                    filepath,
                    segment_count: 1,
                    policy_count: 1,
                });
            }

            self.observer()
                .bundle_written(bundle_num, files.len(), total_size_bytes);
            bundles.push(BundleReport {
                bundle_index: bundle_num,
                dir,
                files,
                total_size_bytes,
            });
        }

        let metadata_file = self.write_metadata(&policies, format, output_dir, &ctx, &output_files)?;

        self.observer()
            .export_finished(policies.len(), segments.len(), &metadata_file);

        Ok(BundleExportResult {
            bundles,
            metadata_file,
            total_policies: policies.len(),
            total_segments: segments.len(),
        })
    }
}
