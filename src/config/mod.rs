//! Configuration for the pipeline.
//!
//! Read from a TOML file (`conf/config.toml` by default). Every key is
//! optional; a missing file yields the defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Default location of the pipeline configuration
pub const DEFAULT_CONFIG_PATH: &str = "conf/config.toml";

/// Configuration for the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Default log filter, overridden by `RUST_LOG`
    pub logging_level: String,
    /// Data preparation stages
    pub data: DataStages,
    /// Analysis stages
    pub tasks: TaskStages,
    /// Parameters passed through to stages
    pub params: Params,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            logging_level: "info".to_string(),
            data: DataStages::default(),
            tasks: TaskStages::default(),
            params: Params::default(),
        }
    }
}

/// Toggles for the data preparation stages
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DataStages {
    pub download: bool,
    pub preprocess: bool,
    pub build_panel: bool,
    pub save_panel: bool,
}

/// Toggles for the analysis stages
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TaskStages {
    pub simulations: bool,
    pub main_regressions: bool,
}

/// Free parameters available to stage implementations
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Number of bootstrap samples for resampling-based stages
    pub n_bootstrap_samples: u32,
    /// Whether stages may use multiple processes/threads
    pub multiprocessing: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            n_bootstrap_samples: 1000,
            multiprocessing: false,
        }
    }
}

impl PipelineConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load a configuration file, falling back to defaults if it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with_source(path).map(|(cfg, _)| cfg)
    }

    /// Like [`PipelineConfig::load`], also reporting where the values came from
    ///
    /// Nothing is logged here; the binary loads its config before the logger
    /// is initialised and logs the [`ConfigSource`] afterwards.
    pub fn load_with_source(path: &Path) -> Result<(Self, ConfigSource)> {
        match fs::read_to_string(path) {
            Ok(text) => {
                let cfg = toml::from_str(&text)
                    .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
                Ok((cfg, ConfigSource::File(path.to_path_buf())))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Ok((Self::default(), ConfigSource::Defaults(path.to_path_buf())))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Origin of a loaded [`PipelineConfig`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from this file
    File(PathBuf),
    /// This file did not exist
    Defaults(PathBuf),
}

impl ConfigSource {
    pub fn log(&self) {
        match self {
            Self::File(path) => log::debug!("Loaded config from {}", path.display()),
            Self::Defaults(path) => {
                log::warn!("Config file {} not found, using defaults", path.display());
            }
        }
    }
}
