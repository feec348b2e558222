//! Splitter configuration.
//!
//! A [`SplitConfig`] is built once (from defaults, a builder, or
//! `.seam/splitter.yaml`) and handed to [`crate::RecursiveSplitter`], which
//! keeps its own copy for the rest of its lifetime.

use crate::error::{SplitError, SplitResult};
use seam_core::{AppError, AppResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default separator cascade, coarsest first.
pub const DEFAULT_SEPARATORS: [&str; 5] = ["\n\n", "\n", ".", ",", " "];

/// How a removed separator is represented at a split point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlaceholderMode {
    /// Registered marker tokens; chunks decode back to the exact source text.
    #[default]
    Reconstruct,

    /// Filler characters matching the separator length; offsets survive,
    /// separator text does not.
    PreserveLength,
}

/// Immutable splitter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Separator cascade, applied in order
    #[serde(default = "default_separators")]
    pub separators: Vec<String>,

    /// Target chunk size in characters
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Characters borrowed from each neighbouring chunk
    #[serde(default, deserialize_with = "deserialize_overlap")]
    pub overlap: usize,

    /// Placeholder encoding for split points
    #[serde(default)]
    pub mode: PlaceholderMode,

    /// Emit per-fragment trace events while splitting
    #[serde(default)]
    pub trace: bool,
}

fn default_separators() -> Vec<String> {
    DEFAULT_SEPARATORS.iter().map(|s| s.to_string()).collect()
}

fn default_chunk_size() -> usize {
    1000
}

/// Negative overlaps are accepted and clamped to their absolute value.
fn deserialize_overlap<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(raw.unsigned_abs() as usize)
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            separators: default_separators(),
            chunk_size: default_chunk_size(),
            overlap: 0,
            mode: PlaceholderMode::default(),
            trace: false,
        }
    }
}

impl SplitConfig {
    /// Start a builder from the default configuration.
    pub fn builder() -> SplitConfigBuilder {
        SplitConfigBuilder::default()
    }

    /// Check the configuration before any document is split.
    pub fn validate(&self) -> SplitResult<()> {
        if self.chunk_size == 0 {
            return Err(SplitError::InvalidChunkSize);
        }

        if self.overlap > self.chunk_size {
            return Err(SplitError::OverlapTooLarge {
                overlap: self.overlap,
                chunk_size: self.chunk_size,
            });
        }

        if let Some(index) = self.separators.iter().position(|s| s.is_empty()) {
            return Err(SplitError::EmptySeparator { index });
        }

        Ok(())
    }
}

/// Builder for [`SplitConfig`].
///
/// ```
/// use seam_split::{PlaceholderMode, SplitConfig};
///
/// let config = SplitConfig::builder()
///     .chunk_size(500)
///     .overlap(-20)
///     .mode(PlaceholderMode::PreserveLength)
///     .build();
/// assert_eq!(config.overlap, 20);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SplitConfigBuilder {
    config: SplitConfig,
}

impl SplitConfigBuilder {
    pub fn separators<I, S>(mut self, separators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.separators = separators.into_iter().map(Into::into).collect();
        self
    }

    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.config.chunk_size = chunk_size;
        self
    }

    /// Set the overlap; negative values are clamped to their absolute value.
    pub fn overlap(mut self, overlap: i64) -> Self {
        self.config.overlap = overlap.unsigned_abs() as usize;
        self
    }

    pub fn mode(mut self, mode: PlaceholderMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn trace(mut self, trace: bool) -> Self {
        self.config.trace = trace;
        self
    }

    pub fn build(self) -> SplitConfig {
        self.config
    }
}

/// Load splitter configuration.
///
/// Loads from `.seam/splitter.yaml` if it exists, otherwise returns the
/// default configuration.
pub fn load_config(workspace: &Path) -> AppResult<SplitConfig> {
    let config_path = get_config_path(workspace);

    if !config_path.exists() {
        tracing::debug!("Using default splitter config (no config file found)");
        return Ok(SplitConfig::default());
    }

    let content = fs::read_to_string(&config_path).map_err(|e| {
        AppError::Config(format!("Failed to read config at {:?}: {}", config_path, e))
    })?;

    let config: SplitConfig = serde_yaml::from_str(&content).map_err(|e| {
        AppError::Config(format!("Failed to parse config at {:?}: {}", config_path, e))
    })?;

    tracing::debug!("Loaded splitter config from {:?}", config_path);
    Ok(config)
}

/// Save splitter configuration.
pub fn save_config(workspace: &Path, config: &SplitConfig) -> AppResult<()> {
    let config_path = get_config_path(workspace);

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            AppError::Config(format!("Failed to create config directory: {}", e))
        })?;
    }

    let yaml = serde_yaml::to_string(config)?;

    fs::write(&config_path, yaml).map_err(|e| {
        AppError::Config(format!("Failed to write config to {:?}: {}", config_path, e))
    })?;

    tracing::debug!("Saved splitter config to {:?}", config_path);
    Ok(())
}

/// Get the path to the splitter config file.
pub fn get_config_path(workspace: &Path) -> PathBuf {
    workspace.join(".seam").join("splitter.yaml")
}
