//! Configuration file support for saved explorer sessions

use anyhow::{Context, Result};
use notescope_filters::FilterCriteria;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default export file name
pub const DEFAULT_EXPORT: &str = "filtered_notes.csv";

/// Saved session: dataset path, export path and filter selections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    pub criteria: FilterCriteria,
}

impl ExplorerConfig {
    /// Load configuration from a file (YAML or TOML)
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        match extension(path) {
            "yaml" | "yml" => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display())),
            "toml" => toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display())),
            other => Err(unsupported(other)),
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = match extension(path) {
            "yaml" | "yml" => serde_yaml::to_string(self)?,
            "toml" => toml::to_string_pretty(self)?,
            other => return Err(unsupported(other)),
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Export path, falling back to `filtered_notes.csv`
    pub fn output_or_default(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT))
    }
}

fn extension(path: &Path) -> &str {
    path.extension().and_then(|s| s.to_str()).unwrap_or("")
}

fn unsupported(extension: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Unsupported config file format: {}. Use .yaml, .yml, or .toml",
        extension
    )
}
