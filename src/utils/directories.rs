//! Standard data and results directories
//!
//! Every project instantiated from this scaffold keeps its data under the
//! directory named by `DATA_DIR` and its outputs under `RESULTS_DIR`. Both
//! variables are usually provided through a `.env` file next to the
//! project root.

use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

use log::{debug, info};

use crate::error::{Error, Result};

/// Variable naming the root data directory
pub const DATA_DIR_VAR: &str = "DATA_DIR";

/// Variable naming the root results directory
pub const RESULTS_DIR_VAR: &str = "RESULTS_DIR";

/// What [`load_dotenv`] found
///
/// `.env` is read before the logger exists, so the outcome is kept and
/// logged with [`DotenvStatus::log`] once logging is set up.
#[derive(Debug)]
pub enum DotenvStatus {
    Loaded(PathBuf),
    NotFound,
    Failed(dotenvy::Error),
}

impl DotenvStatus {
    fn from_result(result: std::result::Result<PathBuf, dotenvy::Error>) -> Self {
        match result {
            Ok(path) => Self::Loaded(path),
            Err(e) if e.not_found() => Self::NotFound,
            Err(e) => Self::Failed(e),
        }
    }

    pub fn log(&self) {
        match self {
            Self::Loaded(path) => debug!("Loaded environment from {}", path.display()),
            Self::NotFound => debug!("No .env file found"),
            Self::Failed(e) => log::warn!("Failed to load .env file: {e}"),
        }
    }
}

/// Load variables from a `.env` file in the working directory or its parents
///
/// Variables already set in the process environment win. A missing `.env`
/// file is not an error.
#[must_use]
pub fn load_dotenv() -> DotenvStatus {
    DotenvStatus::from_result(dotenvy::dotenv())
}

/// Read a required variable through `lookup`, treating empty values as unset
fn required_var<F>(lookup: F, name: &str) -> Result<PathBuf>
where
    F: Fn(&str) -> Option<OsString>,
{
    lookup(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| Error::MissingEnvironmentVariable(name.to_string()))
}

/// Standardized data directory paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDirectories {
    /// Root data directory
    pub data: PathBuf,
    /// Clean/processed data
    pub clean: PathBuf,
    /// Preprocessing cache
    pub preprocessing: PathBuf,
    /// Download cache, created on resolution
    pub download: PathBuf,
    /// Open/public raw data
    pub open: PathBuf,
    /// Restricted raw data
    pub restricted: PathBuf,
    /// Results
    pub results: PathBuf,
}

impl DataDirectories {
    /// Lay out the standard subdirectories below `data`
    ///
    /// Pure path construction; nothing is created.
    #[must_use]
    pub fn from_root(data: impl Into<PathBuf>) -> Self {
        let data = data.into();
        let raw = data.join("raw");
        Self {
            clean: data.join("clean"),
            preprocessing: data.join("preprocessing-cache"),
            download: raw.join("download_cache"),
            open: raw.join("open"),
            restricted: raw.join("restricted"),
            results: data.join("results"),
            data,
        }
    }

    /// Resolve from `DATA_DIR` as reported by `lookup`
    ///
    /// Creates the download directory if it doesn't exist. All other
    /// directories are expected to be created by the user or by pipeline
    /// stages.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let dirs = Self::from_root(required_var(lookup, DATA_DIR_VAR)?);
        fs::create_dir_all(&dirs.download)?;
        info!("Using data directory {}", dirs.data.display());
        Ok(dirs)
    }
}

/// Standardized results directory paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsDirectories {
    /// Root results directory
    pub results: PathBuf,
    /// Figures
    pub figures: PathBuf,
    /// Tables
    pub tables: PathBuf,
    /// Text snippets
    pub text: PathBuf,
}

impl ResultsDirectories {
    #[must_use]
    pub fn from_root(results: impl Into<PathBuf>) -> Self {
        let results = results.into();
        Self {
            figures: results.join("figures"),
            tables: results.join("tables"),
            text: results.join("text"),
            results,
        }
    }

    /// Resolve from `RESULTS_DIR` as reported by `lookup`; creates nothing
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        Ok(Self::from_root(required_var(lookup, RESULTS_DIR_VAR)?))
    }
}

/// Get standardized data directory paths from the `DATA_DIR` environment variable
///
/// # Example
/// ```no_run
/// use study_pipeline::utils::directories::get_data_directories;
///
/// let dirs = get_data_directories()?;
/// let clean_file = dirs.clean.join("dataset.parquet");
/// # Ok::<(), study_pipeline::Error>(())
/// ```
pub fn get_data_directories() -> Result<DataDirectories> {
    DataDirectories::from_lookup(|name| std::env::var_os(name))
}

/// Get standardized results directory paths from the `RESULTS_DIR` environment variable
pub fn get_results_directories() -> Result<ResultsDirectories> {
    ResultsDirectories::from_lookup(|name| std::env::var_os(name))
}
