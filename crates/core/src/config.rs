use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_MAX_CHUNK_SIZE: usize = 4096;
pub const DEFAULT_KB_TITLE: &str = "空间规划政策知识库";

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_usize(profile: &str, key: &str, default: usize) -> usize {
    profiled_env_opt(profile, key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn profiled_env_u64(profile: &str, key: &str, default: u64) -> u64 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub export: ExportConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `POLICYKB_PROFILE`. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("POLICYKB_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            export: ExportConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        let e = &self.export;
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  export:      format={}, output_dir={}", e.format, e.output_dir.display());
        tracing::info!("  chunking:    max_chunk_size={}, workers={}", e.max_chunk_size, e.workers);
        tracing::info!(
            "  bundles:     max_files={}, max_mb={}",
            e.bundle.max_files_per_bundle, e.bundle.max_bundle_mb
        );
    }
}

// ── Export ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Upper bound, in characters, on a single chunk.
    pub max_chunk_size: usize,
    pub output_dir: PathBuf,
    /// "markdown", "json" or "text".
    pub format: String,
    /// Segmentation worker threads (1 = run on the calling thread).
    pub workers: usize,
    /// Heading written at the top of Markdown/Text artifacts.
    pub knowledge_base_title: String,
    pub bundle: BundleConfig,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
            output_dir: PathBuf::from("rag_export"),
            format: "markdown".to_string(),
            workers: 1,
            knowledge_base_title: DEFAULT_KB_TITLE.to_string(),
            bundle: BundleConfig::default(),
        }
    }
}

impl ExportConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            max_chunk_size: profiled_env_usize(p, "RAG_MAX_CHUNK_SIZE", DEFAULT_MAX_CHUNK_SIZE),
            output_dir: PathBuf::from(profiled_env_or(p, "RAG_OUTPUT_DIR", "rag_export")),
            format: profiled_env_or(p, "RAG_EXPORT_FORMAT", "markdown").to_lowercase(),
            workers: profiled_env_usize(p, "RAG_WORKERS", 1),
            knowledge_base_title: profiled_env_or(p, "RAG_KB_TITLE", DEFAULT_KB_TITLE),
            bundle: BundleConfig::from_env_profiled(p),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_chunk_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "RAG_MAX_CHUNK_SIZE",
                value: self.max_chunk_size.to_string(),
                reason: "must be a positive integer",
            });
        }
        if self.workers == 0 {
            return Err(ConfigError::InvalidValue {
                key: "RAG_WORKERS",
                value: self.workers.to_string(),
                reason: "must be at least 1",
            });
        }
        if self.bundle.max_files_per_bundle == 0 {
            return Err(ConfigError::InvalidValue {
                key: "RAG_BUNDLE_MAX_FILES",
                value: self.bundle.max_files_per_bundle.to_string(),
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}

// ── Bundled export ────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleConfig {
    pub max_files_per_bundle: usize,
    pub max_bundle_mb: u64,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            max_files_per_bundle: 50,
            max_bundle_mb: 100,
        }
    }
}

impl BundleConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            max_files_per_bundle: profiled_env_usize(p, "RAG_BUNDLE_MAX_FILES", 50),
            max_bundle_mb: profiled_env_u64(p, "RAG_BUNDLE_MAX_MB", 100),
        }
    }

    /// Byte budget per bundle; saturates instead of overflowing.
    pub fn max_bundle_bytes(&self) -> u64 {
        self.max_bundle_mb.saturating_mul(1024 * 1024)
    }
}
