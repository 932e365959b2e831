//! Configuration management for gr-helper

use crate::error::{GrError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Comment collection settings
    pub comments: CommentsConfig,
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| GrError::Toml(e.to_string()))
    }

    /// Render configuration as TOML text
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| GrError::Toml(e.to_string()))
    }

    /// Load configuration from a file, falling back to defaults when it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
            .map_err(|e| e.with_context(format!("Failed to load {}", path.display())))
    }

    /// Write configuration to a file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Default location of the config file
    pub fn default_path() -> Result<PathBuf> {
        directories::ProjectDirs::from("com", "gr-helper", "gr-helper")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or_else(|| GrError::Config("Cannot determine home directory".to_string()))
    }
}

/// How comments from Gerrit are collected
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentsConfig {
    /// Include published comments
    pub include_published: bool,
    /// Include the user's draft comments
    pub include_drafts: bool,
    /// Drop comments identical to one already collected
    pub deduplicate: bool,
}

impl Default for CommentsConfig {
    fn default() -> Self {
        Self {
            include_published: true,
            include_drafts: true,
            deduplicate: true,
        }
    }
}
