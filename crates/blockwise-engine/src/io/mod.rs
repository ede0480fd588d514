use relative_path::RelativePath;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid source directory: {0}")]
    InvalidSourceDir(String),
}

/// Read a source file and return its content
pub fn read_file(relative_path: &RelativePath, source_root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(source_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Write content to a source file, creating parent directories as needed
pub fn write_file(
    relative_path: &RelativePath,
    source_root: &Path,
    content: &str,
) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(source_root);

    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(&absolute_path, content).map_err(IoError::Io)
}

/// Recursively collect files with the given extension under `source_root`,
/// sorted for stable presentation.
pub fn scan_source_files(source_root: &Path, extension: &str) -> Result<Vec<PathBuf>, IoError> {
    if !source_root.exists() {
        return Err(IoError::InvalidSourceDir(
            "source directory not found".to_string(),
        ));
    }

    let mut files = Vec::new();
    scan_directory_recursive(source_root, extension, &mut files)?;
    files.sort();
    Ok(files)
}

fn scan_directory_recursive(
    dir: &Path,
    extension: &str,
    files: &mut Vec<PathBuf>,
) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, extension, files)?;
        } else if let Some(ext) = path.extension()
            && ext == extension
        {
            files.push(path);
        }
    }

    Ok(())
}

/// Search an ordered list of directories for a file called `name` and
/// return the first hit.
pub fn find_in_path(name: &str, dirs: &[PathBuf]) -> Option<PathBuf> {
    dirs.iter().map(|dir| dir.join(name)).find(|c| c.is_file())
}

pub fn validate_source_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidSourceDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}
