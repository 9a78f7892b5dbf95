// configuration module - optional toml file with defaults for every field

use crate::legacy::AutoModernizationOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "CADENCE_MODERNIZER_CONFIG";

/// looked up in the working directory when nothing else is given
pub const DEFAULT_CONFIG_FILE: &str = "cadence-modernizer.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub modernize: ModernizeConfig,
    pub scan: ScanConfig,
}

/// default rewrite policy, overridable per run from the cli
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModernizeConfig {
    pub auto_fix_critical: bool,
    pub auto_fix_warnings: bool,
    pub preserve_comments: bool,
    pub add_explanation_comments: bool,
}

impl Default for ModernizeConfig {
    fn default() -> Self {
        let options = AutoModernizationOptions::default();
        Self {
            auto_fix_critical: options.auto_fix_critical,
            auto_fix_warnings: options.auto_fix_warnings,
            preserve_comments: options.preserve_comments,
            add_explanation_comments: options.add_explanation_comments,
        }
    }
}

impl From<&ModernizeConfig> for AutoModernizationOptions {
    fn from(config: &ModernizeConfig) -> Self {
        Self {
            auto_fix_critical: config.auto_fix_critical,
            auto_fix_warnings: config.auto_fix_warnings,
            preserve_comments: config.preserve_comments,
            add_explanation_comments: config.add_explanation_comments,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// file extensions to scan, without the dot
    pub extensions: Vec<String>,
    pub max_file_size_kb: usize,
    pub max_files: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["cdc".to_string()],
            max_file_size_kb: 512,
            max_files: 500,
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("failed to parse configuration")
    }

    /// load from `explicit`, then `$CADENCE_MODERNIZER_CONFIG`, then the default file.
    ///
    /// an explicitly named file must exist; a missing default file means defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let named = explicit
            .map(Path::to_path_buf)
            .or_else(|| env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from));

        let path = match named {
            Some(path) => path,
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default_path.exists() {
                    return Ok(Self::default());
                }
                default_path
            }
        };

        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn modernization_options(&self) -> AutoModernizationOptions {
        AutoModernizationOptions::from(&self.modernize)
    }
}
