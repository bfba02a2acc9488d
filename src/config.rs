//! Engine configuration.
//!
//! Names the two plugins and carries the options every plugin receives plus
//! the default search limit. Loaded from JSON, TOML, or YAML by file extension.
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::DEFAULT_SEARCH_LIMIT;
use crate::plugin::PluginConfig;

// ── Default value functions ──────────────────────────────────────────

fn default_search_limit() -> usize {
    DEFAULT_SEARCH_LIMIT
}

// ── Config struct ────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct EngineConfig {
    /// Vector store plugin name.
    pub vector_store: String,

    /// Embedder plugin name.
    pub embedder: String,

    /// Options forwarded verbatim to both plugins.
    #[serde(default, skip_serializing_if = "PluginConfig::is_empty")]
    pub options: PluginConfig,

    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
}

// ── Config implementation ────────────────────────────────────────────

impl EngineConfig {
    pub fn new(vector_store: impl Into<String>, embedder: impl Into<String>) -> Self {
        Self {
            vector_store: vector_store.into(),
            embedder: embedder.into(),
            options: PluginConfig::default(),
            search_limit: default_search_limit(),
        }
    }

    /// Load configuration from a `.json`, `.toml`, `.yaml` or `.yml` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let cfg: EngineConfig = match ext.as_str() {
            "json" => serde_json::from_str(&data)
                .with_context(|| format!("invalid JSON in {}", path.display()))?,
            "toml" => toml::from_str(&data)
                .with_context(|| format!("invalid TOML in {}", path.display()))?,
            "yaml" | "yml" => serde_yaml::from_str(&data)
                .with_context(|| format!("invalid YAML in {}", path.display()))?,
            _ => bail!("unsupported config format: {}", path.display()),
        };

        info!("Loaded configuration from {}", path.display());
        Ok(cfg)
    }

    pub fn from_json_str(data: &str) -> Result<Self> {
        serde_json::from_str(data).context("invalid JSON config")
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("failed to marshal config")?;
        std::fs::write(path, data)
            .with_context(|| format!("failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            !self.vector_store.trim().is_empty(),
            "vector_store plugin name must not be empty"
        );
        anyhow::ensure!(
            !self.embedder.trim().is_empty(),
            "embedder plugin name must not be empty"
        );
        anyhow::ensure!(self.search_limit > 0, "search_limit must be positive");
        Ok(())
    }
}

// ── Tests ────────────────────────────────────────────────────────────
