//! rag-export: build a RAG knowledge base from crawled policy records.
//!
//! Reads a JSON array or JSON Lines file of policy documents, segments every
//! policy along its heading hierarchy and writes `rag_knowledge_base.*`
//! plus `rag_metadata.json` (or size-limited `chunk_NNN/` bundles).

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::info;

use policykb_core::config::{load_dotenv, Config};
use policykb_export::{BundleLimits, ExportFormat, ExportOptions, Exporter};
use policykb_ingest::extract_documents;

// ── CLI ─────────────────────────────────────────────────────────────

/// Export policy documents as a chunked RAG knowledge base.
#[derive(Parser, Debug)]
#[command(name = "rag-export", version, about)]
struct Cli {
    /// Input file: `.json` (array of policies) or `.jsonl`.
    input: PathBuf,

    /// Output directory [env: RAG_OUTPUT_DIR].
    #[arg(long, short)]
    output_dir: Option<PathBuf>,

    /// markdown, json or text [env: RAG_EXPORT_FORMAT].
    #[arg(long, short)]
    format: Option<String>,

    /// Maximum characters per chunk [env: RAG_MAX_CHUNK_SIZE].
    #[arg(long)]
    max_chunk_size: Option<usize>,

    /// Segmentation worker threads [env: RAG_WORKERS].
    #[arg(long)]
    workers: Option<usize>,

    /// Knowledge base title used in Markdown/Text headers [env: RAG_KB_TITLE].
    #[arg(long)]
    title: Option<String>,

    /// Write one file per segment into size-limited chunk_NNN/ directories.
    #[arg(long)]
    bundle: bool,

    /// Files per bundle directory [env: RAG_BUNDLE_MAX_FILES].
    #[arg(long)]
    max_files_per_bundle: Option<usize>,

    /// Content megabytes per bundle directory [env: RAG_BUNDLE_MAX_MB].
    #[arg(long)]
    max_bundle_mb: Option<u64>,
}

impl Cli {
    /// Apply command-line overrides on top of the env config.
    fn merge_into(self, config: &mut Config) -> PathBuf {
        let export = &mut config.export;
        if let Some(v) = self.output_dir {
            export.output_dir = v;
        }
        if let Some(v) = self.format {
            export.format = v;
        }
        if let Some(v) = self.max_chunk_size {
            export.max_chunk_size = v;
        }
        if let Some(v) = self.workers {
            export.workers = v;
        }
        if let Some(v) = self.title {
            export.knowledge_base_title = v;
        }
        if let Some(v) = self.max_files_per_bundle {
            export.bundle.max_files_per_bundle = v;
        }
        if let Some(v) = self.max_bundle_mb {
            export.bundle.max_bundle_mb = v;
        }
        self.input
    }
}

// ── main ────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    load_dotenv();
    let cli = Cli::parse();
    let bundle = cli.bundle;

    let mut config = Config::from_env();
    let input = cli.merge_into(&mut config);
    config.export.validate().context("invalid export configuration")?;
    config.log_summary();

    let format: ExportFormat = match config.export.format.parse() {
        Ok(f) => f,
        Err(e) => bail!(e),
    };

    let bytes = std::fs::read(&input)
        .with_context(|| format!("failed to read input {}", input.display()))?;
    let filename = input.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    let batch = extract_documents(&bytes, filename)
        .with_context(|| format!("failed to load policies from {}", input.display()))?;

    if batch.documents.is_empty() {
        bail!("no usable policy records in {}", input.display());
    }

    let exporter = Exporter::new(ExportOptions::from(&config.export));
    let output_dir = &config.export.output_dir;

    if bundle {
        let limits = BundleLimits::from(&config.export.bundle);
        let result = exporter
            .export_bundles(&batch.documents, format, output_dir, &limits)
            .context("bundled export failed")?;
        info!(
            bundles = result.bundles.len(),
            policies = result.total_policies,
            segments = result.total_segments,
            skipped = batch.rejected.len(),
            metadata = %result.metadata_file.display(),
            "done"
        );
    } else {
        let result = exporter
            .export(&batch.documents, format, output_dir)
            .context("export failed")?;
        for file in &result.output_files {
            info!(file = %file.filepath.display(), "written");
        }
        info!(
            policies = result.total_policies,
            segments = result.total_segments,
            skipped = batch.rejected.len(),
            metadata = %result.metadata_file.display(),
            "done"
        );
    }
    Ok(())
}
