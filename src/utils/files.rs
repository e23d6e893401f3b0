//! Timestamped output files
//!
//! Artifacts are persisted under names of the form
//! `<stem>_UTC<YYYYMMDD>_<HHMMSS><extension>`, for example
//! `panel_UTC20240115_093000.parquet`. Every field of the timestamp is
//! fixed-width and zero-padded, so the lexicographically greatest stem in a
//! directory is also the most recent write. That property is what
//! [`latest_file`] relies on; it never parses the timestamp itself.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};
use glob::Pattern;
use itertools::Itertools;
use log::debug;

use crate::error::{Error, Result};

/// Literal infix placed between the original stem and the timestamp
pub const UTC_MARKER: &str = "_UTC";

/// chrono format of the timestamp token (`YYYYMMDD_HHMMSS`)
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Extension searched by [`LatestFileQuery`] unless told otherwise
pub const DEFAULT_EXTENSION: &str = ".parquet";

/// The `YYYYMMDD_HHMMSS` part of a timestamped file name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimestampToken(String);

impl TimestampToken {
    /// Token for the current instant, truncated to whole seconds
    #[must_use]
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    #[must_use]
    pub fn from_datetime(instant: DateTime<Utc>) -> Self {
        Self(instant.format(TIMESTAMP_FORMAT).to_string())
    }

    /// Extract the token from a stem such as `panel_UTC20240115_093000`
    ///
    /// Returns `None` when the stem carries no marker or the text after the
    /// last marker is not a valid timestamp.
    #[must_use]
    pub fn from_stem(stem: &str) -> Option<Self> {
        let (_, raw) = stem.rsplit_once(UTC_MARKER)?;
        let token = Self(raw.to_string());
        token.to_datetime().map(|_| token)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the token back into a UTC instant
    #[must_use]
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        NaiveDateTime::parse_from_str(&self.0, TIMESTAMP_FORMAT)
            .ok()
            .map(|naive| naive.and_utc())
    }
}

impl fmt::Display for TimestampToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Split a file name into stem and extension at the last dot
///
/// The extension keeps its leading dot. Names that start with their only
/// dot (`.env`) or end in a dot (`file.`) have no extension.
#[must_use]
pub fn split_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < name.len() => name.split_at(idx),
        _ => (name, ""),
    }
}

/// Stem and extension of the final component of `path`
fn split_file_name(path: &Path) -> (String, String) {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    let (stem, extension) = split_name(&name);
    (stem.to_string(), extension.to_string())
}

/// Directory containing `file`, with `.` for bare file names
fn parent_dir(file: &Path) -> PathBuf {
    file.parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

/// Derive a timestamped sibling of `file` using the current UTC time
///
/// `data/clean/panel.parquet` becomes
/// `data/clean/panel_UTC20240115_093000.parquet`. Nothing is created on
/// disk. Two calls within the same second return the same name.
#[must_use]
pub fn timestamp_file(file: &Path) -> PathBuf {
    timestamp_file_at(file, Utc::now())
}

/// Same as [`timestamp_file`] for an explicit instant
#[must_use]
pub fn timestamp_file_at(file: &Path, instant: DateTime<Utc>) -> PathBuf {
    let (stem, extension) = split_file_name(file);
    let token = TimestampToken::from_datetime(instant);
    file.with_file_name(format!("{stem}{UTC_MARKER}{token}{extension}"))
}

/// Glob `<prefix>_UTC*<extension>` with prefix and extension taken literally
pub fn timestamp_pattern(prefix: &str, extension: &str) -> Result<Pattern> {
    let pattern = format!(
        "{}{UTC_MARKER}*{}",
        Pattern::escape(prefix),
        Pattern::escape(extension)
    );
    Pattern::new(&pattern).map_err(|e| Error::Config(format!("invalid pattern {pattern}: {e}")))
}

/// Lookup of the most recent timestamped artifact in a directory
///
/// Either a base `file` or a `prefix` must be set. A base file takes
/// precedence: prefix, extension and directory are then all derived from
/// it, and any explicitly set values are ignored.
///
/// # Example
/// ```no_run
/// use study_pipeline::utils::files::LatestFileQuery;
///
/// let latest = LatestFileQuery::new()
///     .prefix("panel")
///     .directory("data/clean")
///     .resolve()?;
/// # Ok::<(), study_pipeline::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct LatestFileQuery {
    file: Option<PathBuf>,
    prefix: Option<String>,
    extension: String,
    directory: PathBuf,
}

impl Default for LatestFileQuery {
    fn default() -> Self {
        Self {
            file: None,
            prefix: None,
            extension: DEFAULT_EXTENSION.to_string(),
            directory: PathBuf::from("."),
        }
    }
}

impl LatestFileQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Base file path without timestamp, e.g. `data/clean/panel.parquet`
    #[must_use]
    pub fn file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Extension including the leading dot, or empty
    #[must_use]
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    #[must_use]
    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    /// Scan the directory and return the entry with the greatest stem
    ///
    /// Returns `Ok(None)` when nothing matches, including when the directory
    /// does not exist. Other errors from listing the directory are returned
    /// as-is.
    pub fn resolve(&self) -> Result<Option<PathBuf>> {
        match (&self.file, &self.prefix) {
            (Some(file), _) => {
                let (stem, extension) = split_file_name(file);
                scan_latest(&parent_dir(file), &stem, &extension)
            }
            (None, Some(prefix)) => scan_latest(&self.directory, prefix, &self.extension),
            (None, None) => Err(Error::missing_file_param()),
        }
    }
}

/// Return the latest file matching the prefix and extension in the directory
///
/// Convenience wrapper around [`LatestFileQuery`].
pub fn latest_file(
    file: Option<&Path>,
    prefix: Option<&str>,
    extension: &str,
    directory: &Path,
) -> Result<Option<PathBuf>> {
    let mut query = LatestFileQuery::new()
        .extension(extension)
        .directory(directory);
    if let Some(file) = file {
        query = query.file(file);
    }
    if let Some(prefix) = prefix {
        query = query.prefix(prefix);
    }
    query.resolve()
}

fn scan_latest(directory: &Path, prefix: &str, extension: &str) -> Result<Option<PathBuf>> {
    let pattern = timestamp_pattern(prefix, extension)?;
    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        // A directory that was never written to holds no candidates
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("{} does not exist, no candidates", directory.display());
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };
    let candidates: Vec<(String, PathBuf)> = entries
        .map_ok(|entry| (entry.file_name().to_string_lossy().into_owned(), entry.path()))
        .filter_ok(|(name, _)| pattern.matches(name))
        .collect::<io::Result<_>>()?;

    debug!(
        "Found {} candidates for {prefix}{UTC_MARKER}*{extension} in {}",
        candidates.len(),
        directory.display()
    );

    // Same-stem ties fall back to the full name so the result is stable
    Ok(candidates
        .into_iter()
        .max_by(|(a, _), (b, _)| {
            split_name(a)
                .0
                .cmp(split_name(b).0)
                .then_with(|| a.cmp(b))
        })
        .map(|(_, path)| path))
}
