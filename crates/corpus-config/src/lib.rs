use anyhow::Context;
use corpus_core::{BuildOptions, EntryOrder, Markers};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Simple configuration for corpus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,

    #[serde(default = "default_target_size_mb")]
    pub target_size_mb: u64,

    #[serde(default)]
    pub order: EntryOrder,

    #[serde(default)]
    pub markers: Markers,

    #[serde(default = "default_models")]
    pub models: Vec<ModelRecommendation>,
}

/// Encoding a model expects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRecommendation {
    pub model: String,
    pub encoding: String,
}

impl ModelRecommendation {
    pub fn new(model: &str, encoding: &str) -> Self {
        Self {
            model: model.to_string(),
            encoding: encoding.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            output_file: default_output_file(),
            target_size_mb: default_target_size_mb(),
            order: EntryOrder::default(),
            markers: Markers::default(),
            models: default_models(),
        }
    }
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("books")
}

fn default_output_file() -> PathBuf {
    PathBuf::from("combined_gutenberg_books_32mb.txt")
}

fn default_target_size_mb() -> u64 {
    32
}

fn default_models() -> Vec<ModelRecommendation> {
    vec![
        ModelRecommendation::new("gpt-4", "cl100k_base"),
        ModelRecommendation::new("gpt-3.5-turbo", "cl100k_base"),
        ModelRecommendation::new("text-davinci-002", "p50k_base"),
        ModelRecommendation::new("text-davinci-003", "p50k_base"),
        ModelRecommendation::new("davinci", "r50k_base"),
    ]
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        Self::load_or_create(&Self::config_path())
    }

    /// Load `path`, writing the defaults there first if it doesn't exist.
    ///
    /// Failing to write the defaults is not an error; the defaults are used as-is.
    pub fn load_or_create(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            return Self::load_from(path);
        }

        let config = Config::default();
        if let Err(e) = config.write_to(path) {
            tracing::warn!(path = %path.display(), error = %e, "Could not write default config");
        }
        Ok(config)
    }

    fn write_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write default config {}", path.display()))?;
        Ok(())
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "corpus", "corpus") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.corpus/config.toml")
        }
    }

    pub fn target_size_bytes(&self) -> u64 {
        self.target_size_mb.saturating_mul(BYTES_PER_MB)
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions::new(
            &self.source_dir,
            &self.output_file,
            self.target_size_bytes(),
        )
        .with_markers(self.markers.clone())
        .with_order(self.order)
    }
}
