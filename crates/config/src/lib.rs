//! Configuration loading, validation, and management for ChatRAG.
//!
//! Loads configuration from `~/.chatrag/config.toml` with environment
//! variable overrides. Every field has a default, so a missing file is
//! not an error.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.chatrag/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Chunking, ranking, and context-budget tuning
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Tuning for the retrieval engine.
///
/// Sizes and offsets are measured in bytes of the rendered transcript;
/// the context budget is measured in characters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Target chunk length before boundary snapping
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// How far each chunk reaches back into its predecessor
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    /// Chunks whose trimmed text is this long or shorter are dropped
    #[serde(default = "default_min_chunk_len")]
    pub min_chunk_len: usize,

    /// Hard bound on chunker iterations; text past it is not indexed
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Width of the window, ending at the proposed cut, searched for a
    /// turn or sentence boundary
    #[serde(default = "default_boundary_window")]
    pub boundary_window: usize,

    /// Maximum relative boost given to the latest chunk (0.3 = +30%)
    #[serde(default = "default_recency_weight")]
    pub recency_weight: f64,

    /// Chunks returned by a search when the caller does not say
    #[serde(default = "default_top_k")]
    pub default_top_k: usize,

    /// Upper bound on the assembled context, in characters
    #[serde(default = "default_max_context_chars")]
    pub max_context_chars: usize,

    /// Characters held back from a truncated final chunk
    #[serde(default = "default_ellipsis_reserve")]
    pub ellipsis_reserve: usize,
}

fn default_chunk_size() -> usize {
    800
}
fn default_chunk_overlap() -> usize {
    150
}
fn default_min_chunk_len() -> usize {
    30
}
fn default_max_iterations() -> usize {
    5000
}
fn default_boundary_window() -> usize {
    100
}
fn default_recency_weight() -> f64 {
    0.3
}
fn default_top_k() -> usize {
    4
}
fn default_max_context_chars() -> usize {
    3000
}
fn default_ellipsis_reserve() -> usize {
    10
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            min_chunk_len: default_min_chunk_len(),
            max_iterations: default_max_iterations(),
            boundary_window: default_boundary_window(),
            recency_weight: default_recency_weight(),
            default_top_k: default_top_k(),
            max_context_chars: default_max_context_chars(),
            ellipsis_reserve: default_ellipsis_reserve(),
        }
    }
}

impl RetrievalConfig {
    /// Check the invariants the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::ValidationError(
                "retrieval.chunk_size must be > 0".into(),
            ));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(ConfigError::ValidationError(
                "retrieval.chunk_overlap must be smaller than chunk_size".into(),
            ));
        }
        if self.boundary_window > self.chunk_size {
            return Err(ConfigError::ValidationError(
                "retrieval.boundary_window must not exceed chunk_size".into(),
            ));
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::ValidationError(
                "retrieval.max_iterations must be > 0".into(),
            ));
        }
        if !(self.recency_weight >= 0.0 && self.recency_weight.is_finite()) {
            return Err(ConfigError::ValidationError(
                "retrieval.recency_weight must be a finite number >= 0".into(),
            ));
        }
        if self.default_top_k == 0 {
            return Err(ConfigError::ValidationError(
                "retrieval.default_top_k must be > 0".into(),
            ));
        }
        if self.max_context_chars <= self.ellipsis_reserve {
            return Err(ConfigError::ValidationError(
                "retrieval.max_context_chars must exceed ellipsis_reserve".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset (e.g. "info", "chatrag_index=debug")
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit newline-delimited JSON instead of human-readable lines
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.chatrag/config.toml).
    ///
    /// Environment overrides (highest priority):
    /// - `CHATRAG_TOP_K`
    /// - `CHATRAG_MAX_CONTEXT_CHARS`
    /// - `CHATRAG_LOG`
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_overrides(&Self::default_path())
    }

    /// Load from `path`, then apply environment overrides.
    pub fn load_with_overrides(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_from(path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides read through `lookup` (the process environment in
    /// production).
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(raw) = lookup("CHATRAG_TOP_K") {
            self.retrieval.default_top_k = parse_override("CHATRAG_TOP_K", &raw)?;
        }
        if let Some(raw) = lookup("CHATRAG_MAX_CONTEXT_CHARS") {
            self.retrieval.max_context_chars = parse_override("CHATRAG_MAX_CONTEXT_CHARS", &raw)?;
        }
        if let Some(level) = lookup("CHATRAG_LOG") {
            self.logging.level = level;
        }
        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".chatrag")
    }

    /// Path of the default config file.
    pub fn default_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "logging.level must not be empty".into(),
            ));
        }
        self.retrieval.validate()
    }

    /// Generate a default config TOML string (for `config init`).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

fn parse_override(key: &str, raw: &str) -> Result<usize, ConfigError> {
    raw.trim().parse().map_err(|_| {
        ConfigError::ValidationError(format!("{key} must be a non-negative integer, got {raw:?}"))
    })
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
