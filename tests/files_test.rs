//! Tests for timestamped file naming and latest-file resolution

mod utils;

use std::path::{Path, PathBuf};
use std::thread::sleep;
use std::time::Duration;

use chrono::{NaiveDateTime, TimeDelta, Utc};
use study_pipeline::utils::files::{TIMESTAMP_FORMAT, split_name};
use study_pipeline::{Error, LatestFileQuery, latest_file, timestamp_file};
use tempfile::TempDir;

use utils::{dir_with_files, file_name, touch};

fn stem(path: &Path) -> &str {
    split_name(file_name(path)).0
}

#[test]
fn test_latest_file_with_prefix() -> study_pipeline::Result<()> {
    let dir = dir_with_files(&[
        "data_UTC20231015_120000.parquet",
        "data_UTC20231016_120000.parquet",
        "data_UTC20231017_120000.parquet",
    ]);

    let result = LatestFileQuery::new().prefix("data").directory(dir.path()).resolve()?;

    let result = result.expect("a match");
    assert_eq!(file_name(&result), "data_UTC20231017_120000.parquet");
    assert_eq!(result.parent(), Some(dir.path()));
    Ok(())
}

#[test]
fn test_latest_file_with_file_path() -> study_pipeline::Result<()> {
    let dir = dir_with_files(&[
        "output_UTC20231015_120000.csv",
        "output_UTC20231016_120000.csv",
    ]);

    let result = latest_file(
        Some(dir.path().join("output.csv").as_path()),
        None,
        ".parquet",
        Path::new("."),
    )?;

    assert_eq!(file_name(&result.expect("a match")), "output_UTC20231016_120000.csv");
    Ok(())
}

#[test]
fn test_latest_file_custom_extension() -> study_pipeline::Result<()> {
    let dir = dir_with_files(&[
        "log_UTC20231015_120000.txt",
        "log_UTC20231016_120000.txt",
        "log_UTC20231017_120000.parquet",
    ]);

    let result = latest_file(None, Some("log"), ".txt", dir.path())?;

    assert_eq!(file_name(&result.expect("a match")), "log_UTC20231016_120000.txt");
    Ok(())
}

#[test]
fn test_latest_file_no_matches() -> study_pipeline::Result<()> {
    let dir = TempDir::new()?;
    let result = LatestFileQuery::new()
        .prefix("nonexistent")
        .directory(dir.path())
        .resolve()?;
    assert!(result.is_none());
    Ok(())
}

#[test]
fn test_latest_file_missing_params() {
    let err = latest_file(None, None, ".parquet", Path::new(".")).unwrap_err();
    assert!(matches!(err, Error::MissingParameter(_)));
    assert!(err.to_string().contains("Either file or prefix must be provided"));
}

#[test]
fn test_latest_file_file_overrides_prefix() -> study_pipeline::Result<()> {
    let dir = dir_with_files(&[
        "test_UTC20231015_120000.parquet",
        "test_UTC20231016_120000.parquet",
        "other_UTC20231017_120000.parquet",
    ]);
    let file_path = dir.path().join("test.parquet");

    let with_prefix = LatestFileQuery::new()
        .file(&file_path)
        .prefix("other")
        .extension(".csv")
        .directory("/nonexistent")
        .resolve()?;
    let without_prefix = LatestFileQuery::new().file(&file_path).resolve()?;

    assert_eq!(with_prefix, without_prefix);
    assert_eq!(file_name(&with_prefix.expect("a match")), "test_UTC20231016_120000.parquet");
    Ok(())
}

#[test]
fn test_latest_file_lexicographic_ordering() -> study_pipeline::Result<()> {
    let dir = dir_with_files(&[
        "data_UTC20231001_120000.parquet",
        "data_UTC20231015_120000.parquet",
        "data_UTC20230901_120000.parquet",
    ]);

    let result = latest_file(None, Some("data"), ".parquet", dir.path())?;

    assert_eq!(file_name(&result.expect("a match")), "data_UTC20231015_120000.parquet");
    Ok(())
}

#[test]
fn test_latest_file_mixed_files() -> study_pipeline::Result<()> {
    let dir = dir_with_files(&[
        "data_UTC20231015_120000.parquet",
        "data_UTC20231017_120000.parquet",
        "data_UTC20231016_120000.parquet",
        "data.parquet",
        "data_20231017.parquet",
        "data_UTC20231019_120000.csv",
        "other_UTC20231018_120000.parquet",
    ]);

    let result = latest_file(None, Some("data"), ".parquet", dir.path())?;

    assert_eq!(file_name(&result.expect("a match")), "data_UTC20231017_120000.parquet");
    Ok(())
}

#[test]
fn test_latest_file_only_unrelated_files() -> study_pipeline::Result<()> {
    let dir = dir_with_files(&["data.parquet", "data_20231017.parquet"]);
    assert!(latest_file(None, Some("data"), ".parquet", dir.path())?.is_none());
    Ok(())
}

#[test]
fn test_latest_file_token_not_validated() -> study_pipeline::Result<()> {
    // Anything in the token position takes part in the comparison
    let dir = dir_with_files(&["data_UTC20231015_120000.parquet", "data_UTCzzz.parquet"]);
    let result = latest_file(None, Some("data"), ".parquet", dir.path())?;
    assert_eq!(file_name(&result.expect("a match")), "data_UTCzzz.parquet");
    Ok(())
}

#[test]
fn test_latest_file_prefix_is_literal() -> study_pipeline::Result<()> {
    let dir = dir_with_files(&["da*a_UTC20231015_120000.parquet", "data_UTC20231016_120000.parquet"]);
    let result = latest_file(None, Some("da*a"), ".parquet", dir.path())?;
    assert_eq!(file_name(&result.expect("a match")), "da*a_UTC20231015_120000.parquet");
    Ok(())
}

#[test]
fn test_latest_file_same_stem_tie_is_stable() -> study_pipeline::Result<()> {
    let dir = dir_with_files(&["run_UTC20231015_120000.csv", "run_UTC20231015_120000.txt"]);
    let result = latest_file(None, Some("run"), "", dir.path())?;
    assert_eq!(file_name(&result.expect("a match")), "run_UTC20231015_120000.txt");
    Ok(())
}

#[test]
fn test_latest_file_missing_directory_is_no_match() -> study_pipeline::Result<()> {
    let dir = TempDir::new()?;
    let missing = dir.path().join("clean");

    assert!(latest_file(None, Some("panel"), ".parquet", &missing)?.is_none());
    let with_file = LatestFileQuery::new().file(missing.join("panel.parquet")).resolve()?;
    assert!(with_file.is_none());
    Ok(())
}

#[test]
fn test_latest_file_directory_is_not_a_directory() {
    // Listing a regular file fails with something other than NotFound
    let dir = dir_with_files(&["panel.parquet"]);
    let not_a_dir = dir.path().join("panel.parquet");
    let err = latest_file(None, Some("panel"), ".parquet", &not_a_dir).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_timestamp_file_basic() {
    let result = timestamp_file(Path::new("data.parquet"));

    assert!(stem(&result).starts_with("data_UTC"));
    assert!(file_name(&result).ends_with(".parquet"));
    assert_eq!(result.parent(), Some(Path::new("")));
}

#[test]
fn test_timestamp_file_with_directory() {
    let result = timestamp_file(Path::new("output/subfolder/data.csv"));

    assert_eq!(result.parent(), Some(Path::new("output/subfolder")));
    assert!(stem(&result).starts_with("data_UTC"));
    assert_eq!(split_name(file_name(&result)).1, ".csv");
}

#[test]
fn test_timestamp_file_format() {
    let result = timestamp_file(Path::new("test.txt"));
    let token = stem(&result).strip_prefix("test_UTC").expect("marker after stem");

    assert_eq!(token.len(), 15);
    assert_eq!(&token[8..9], "_");
    assert!(NaiveDateTime::parse_from_str(token, TIMESTAMP_FORMAT).is_ok());
}

#[test]
fn test_timestamp_file_different_extensions() {
    for (name, expected) in [
        ("data.parquet", ".parquet"),
        ("output.csv", ".csv"),
        ("log.txt", ".txt"),
        ("archive.tar.gz", ".gz"),
    ] {
        let result = timestamp_file(Path::new(name));
        assert_eq!(split_name(file_name(&result)).1, expected, "{name}");
    }
}

#[test]
fn test_timestamp_file_no_extension() {
    let result = timestamp_file(Path::new("README"));
    assert!(stem(&result).starts_with("README_UTC"));
    assert_eq!(split_name(file_name(&result)).1, "");
}

#[test]
fn test_timestamp_file_uses_utc() {
    let before = Utc::now();
    let result = timestamp_file(Path::new("test.parquet"));
    let after = Utc::now();

    let token = stem(&result).strip_prefix("test_UTC").expect("marker after stem");
    let stamped = NaiveDateTime::parse_from_str(token, TIMESTAMP_FORMAT)
        .expect("valid timestamp")
        .and_utc();

    assert!(before - TimeDelta::seconds(1) <= stamped);
    assert!(stamped <= after + TimeDelta::seconds(1));
}

#[test]
fn test_timestamp_file_uniqueness() {
    let first = timestamp_file(Path::new("data.parquet"));
    sleep(Duration::from_millis(1100));
    let second = timestamp_file(Path::new("data.parquet"));

    assert_ne!(first, second);
    assert!(stem(&first) < stem(&second));
}

#[test]
fn test_timestamped_file_round_trip() -> study_pipeline::Result<()> {
    let dir = dir_with_files(&["panel_UTC20000101_000000.parquet"]);
    let written: PathBuf = timestamp_file(&dir.path().join("panel.parquet"));
    touch(dir.path(), file_name(&written));

    let latest = LatestFileQuery::new().file(dir.path().join("panel.parquet")).resolve()?;

    assert_eq!(latest, Some(written));
    Ok(())
}
