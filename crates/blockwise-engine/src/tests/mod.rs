//! Shared fixtures for engine tests.

use std::path::PathBuf;

use tempfile::TempDir;

/// Creates an empty temporary directory standing in for a source tree.
pub fn create_test_source_dir() -> TempDir {
    TempDir::new().expect("failed to create temp source dir")
}

/// Writes a file (with content) into the test source dir, returning its path.
pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create parent dirs");
    }
    std::fs::write(&path, content).expect("failed to write test file");
    path
}
