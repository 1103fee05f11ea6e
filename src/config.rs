//! Generator configuration, loaded from JSON.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Which classification/selection oracle backs the generator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OracleKind {
    /// Deterministic keyword rules only.
    #[default]
    Keyword,
    /// An OpenAI-compatible chat-completions endpoint, with keyword fallback.
    Remote,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    pub kind: OracleKind,
    pub endpoint: String,
    pub model: String,
    /// Environment variable holding the API key. The key itself is never stored.
    pub api_key_env: String,
    pub timeout_ms: u64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            kind: OracleKind::Keyword,
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_ms: 30_000,
        }
    }
}

impl OracleConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub components_dir: Option<PathBuf>,
    pub examples_dir: Option<PathBuf>,
    /// Binary index cache. When set, unchanged artifacts are not re-extracted.
    pub cache_path: Option<PathBuf>,
    /// Longer selections, the basic_chat fallback included, are truncated to
    /// this many components.
    pub max_components: usize,
    pub max_description_len: usize,
    pub oracle: OracleConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            components_dir: None,
            examples_dir: None,
            cache_path: None,
            max_components: 20,
            max_description_len: 500,
            oracle: OracleConfig::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn with_components_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.components_dir = Some(dir.into());
        self
    }

    pub fn with_examples_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.examples_dir = Some(dir.into());
        self
    }

    pub fn with_cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_path = Some(path.into());
        self
    }

    pub fn with_max_components(mut self, max: usize) -> Self {
        self.max_components = max;
        self
    }
}
