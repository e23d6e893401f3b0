//! Utilities shared by pipeline stages
//!
//! - [`files`]: timestamped output names and latest-file lookup
//! - [`directories`]: standard data/results layout from the environment
//! - [`logging`]: logger setup and stage logging helpers

pub mod directories;
pub mod files;
pub mod logging;

// Re-export commonly used functions for convenience
pub use directories::{
    DataDirectories, DotenvStatus, ResultsDirectories, get_data_directories,
    get_results_directories, load_dotenv,
};
pub use files::{LatestFileQuery, TimestampToken, latest_file, timestamp_file, timestamp_file_at};
