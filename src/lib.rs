//! Scaffold utilities for data-analysis pipelines: standard data
//! directories, timestamped output files, a configuration-driven stage
//! runner and tables for Quarto documents.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod tables;
pub mod utils;

// Re-export the most common types for easier use
pub use config::PipelineConfig;
pub use error::{Error, Result};
pub use pipeline::{NoopStages, Pipeline, PipelineReport, PipelineStages, Stage, StageContext};
pub use tables::QuartoTable;

// Directory layout
pub use utils::directories::{
    DataDirectories, ResultsDirectories, get_data_directories, get_results_directories,
};

// Timestamped files
pub use utils::files::{LatestFileQuery, TimestampToken, latest_file, timestamp_file};
