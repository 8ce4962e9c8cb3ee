//! YAML Configuration File Support for RVDC
//!
//! This module provides support for loading comparison pipeline
//! configurations from YAML files. It allows callers to define all stage
//! configurations (align, diff, compare) in a single YAML file and load them
//! at runtime.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! # RVDC Pipeline Configuration
//! version: "1.0"
//!
//! align:
//!   version: 1
//!   gap_penalty: 0.4
//!   min_match_similarity: 0.3
//!   seed: 15131917648511590125
//!   max_paragraphs: 2000
//!
//! diff:
//!   version: 1
//!   max_tokens: 5000
//!
//! compare:
//!   version: 1
//!   max_document_bytes: 10485760
//!   use_parallel: false
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{AlignConfig, CompareConfig, DiffConfig};

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration structure for the comparison pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RvdcConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    /// Alignment stage configuration
    #[serde(default)]
    pub align: AlignYamlConfig,

    /// Diff stage configuration
    #[serde(default)]
    pub diff: DiffYamlConfig,

    /// Umbrella compare configuration
    #[serde(default)]
    pub compare: CompareYamlConfig,
}

impl RvdcConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: RvdcConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigLoadError> {
        // Check version
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        // Validate individual stage configs
        self.align.validate()?;
        self.diff.validate()?;
        self.compare.validate()?;

        Ok(())
    }

    /// Build the runtime [`CompareConfig`] this file describes.
    pub fn into_compare_config(self) -> CompareConfig {
        CompareConfig {
            version: self.compare.version,
            align: AlignConfig {
                version: self.align.version,
                gap_penalty: self.align.gap_penalty,
                min_match_similarity: self.align.min_match_similarity,
                seed: self.align.seed,
                max_paragraphs: self.align.max_paragraphs,
            },
            diff: DiffConfig {
                version: self.diff.version,
                max_tokens: self.diff.max_tokens,
            },
            max_document_bytes: self.compare.max_document_bytes,
            use_parallel: self.compare.use_parallel,
        }
    }
}

impl Default for RvdcConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            align: AlignYamlConfig::default(),
            diff: DiffYamlConfig::default(),
            compare: CompareYamlConfig::default(),
        }
    }
}

/// Alignment stage YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_gap_penalty")]
    pub gap_penalty: f64,

    #[serde(default = "default_min_match_similarity")]
    pub min_match_similarity: f64,

    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(default = "default_max_paragraphs")]
    pub max_paragraphs: Option<usize>,
}

impl AlignYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.version == 0 {
            return Err(ConfigLoadError::Validation(
                "align.version must be >= 1".to_string(),
            ));
        }
        if !self.gap_penalty.is_finite() || self.gap_penalty < 0.0 {
            return Err(ConfigLoadError::Validation(
                "align.gap_penalty must be finite and >= 0.0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_match_similarity) {
            return Err(ConfigLoadError::Validation(
                "align.min_match_similarity must be between 0.0 and 1.0".to_string(),
            ));
        }
        if self.max_paragraphs == Some(0) {
            return Err(ConfigLoadError::Validation(
                "align.max_paragraphs must be >= 1 when set".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for AlignYamlConfig {
    fn default() -> Self {
        let runtime = AlignConfig::default();
        Self {
            version: runtime.version,
            gap_penalty: runtime.gap_penalty,
            min_match_similarity: runtime.min_match_similarity,
            seed: runtime.seed,
            max_paragraphs: runtime.max_paragraphs,
        }
    }
}

/// Diff stage YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: Option<usize>,
}

impl DiffYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.version == 0 {
            return Err(ConfigLoadError::Validation(
                "diff.version must be >= 1".to_string(),
            ));
        }
        if self.max_tokens == Some(0) {
            return Err(ConfigLoadError::Validation(
                "diff.max_tokens must be >= 1 when set".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for DiffYamlConfig {
    fn default() -> Self {
        let runtime = DiffConfig::default();
        Self {
            version: runtime.version,
            max_tokens: runtime.max_tokens,
        }
    }
}

/// Umbrella compare YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_max_document_bytes")]
    pub max_document_bytes: Option<usize>,

    #[serde(default)]
    pub use_parallel: bool,
}

impl CompareYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.version == 0 {
            return Err(ConfigLoadError::Validation(
                "compare.version must be >= 1".to_string(),
            ));
        }
        if self.max_document_bytes == Some(0) {
            return Err(ConfigLoadError::Validation(
                "compare.max_document_bytes must be >= 1 when set".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CompareYamlConfig {
    fn default() -> Self {
        let runtime = CompareConfig::default();
        Self {
            version: runtime.version,
            max_document_bytes: runtime.max_document_bytes,
            use_parallel: runtime.use_parallel,
        }
    }
}

// Helper functions for serde defaults
fn default_version() -> u32 {
    1
}
fn default_gap_penalty() -> f64 {
    AlignConfig::default().gap_penalty
}
fn default_min_match_similarity() -> f64 {
    AlignConfig::default().min_match_similarity
}
fn default_seed() -> u64 {
    AlignConfig::default().seed
}
fn default_max_paragraphs() -> Option<usize> {
    AlignConfig::default().max_paragraphs
}
fn default_max_tokens() -> Option<usize> {
    DiffConfig::default().max_tokens
}
fn default_max_document_bytes() -> Option<usize> {
    CompareConfig::default().max_document_bytes
}
