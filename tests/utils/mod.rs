//! Shared helpers for integration tests

#![allow(dead_code)]

use std::fs::File;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Create an empty file named `name` inside `dir`
pub fn touch(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    File::create(&path).expect("create test file");
    path
}

/// A scratch directory populated with empty files
pub fn dir_with_files(names: &[&str]) -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    for name in names {
        touch(dir.path(), name);
    }
    dir
}

/// File name of a resolved path, for compact assertions
pub fn file_name(path: &Path) -> &str {
    path.file_name()
        .and_then(|name| name.to_str())
        .expect("utf-8 file name")
}
