//! Logging utilities
//!
//! This module sets up `env_logger` and provides standardized logging
//! helpers for pipeline stages.

use std::path::Path;
use std::time::Duration;

/// Initialise the global logger
///
/// `level` is the configured default filter (e.g. `"info"` or
/// `"study_pipeline=debug"`); `RUST_LOG` takes precedence when set.
/// Calling this more than once is harmless.
pub fn init_logging(level: &str) {
    let result = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init();
    if result.is_ok() {
        log::debug!("Logging initialised with default filter '{level}'");
    }
}

/// Log the start of a stage with consistent format
pub fn log_stage_start(description: &str) {
    log::info!("{description}");
}

/// Log a written or resolved artifact with consistent format
///
/// # Arguments
/// * `message` - What happened to the artifact
/// * `path` - Optional path of the artifact
pub fn log_artifact(message: &str, path: Option<&Path>) {
    if let Some(path) = path {
        log::info!("{} {}", message, path.display());
    } else {
        log::warn!("{message}: none found");
    }
}

/// Log pipeline completion
pub fn log_complete(elapsed: Duration) {
    log::info!("Complete. Total runtime: {:.2} seconds", elapsed.as_secs_f64());
}
