use relative_path::{RelativePath, RelativePathBuf};

/// A source file known by its path relative to the workspace root, with
/// display-friendly forms precomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    relative_path: RelativePathBuf,
    display_name: String,
    display_path: String,
}

impl SourceFile {
    pub fn new(relative_path: RelativePathBuf) -> Self {
        let display_name = relative_path
            .file_stem()
            .unwrap_or("untitled")
            .to_string();
        let display_path = {
            let s = relative_path.as_str();
            match relative_path.extension() {
                Some(ext) => s
                    .strip_suffix(ext)
                    .and_then(|s| s.strip_suffix('.'))
                    .unwrap_or(s)
                    .to_string(),
                None => s.to_string(),
            }
        };

        Self {
            relative_path,
            display_name,
            display_path,
        }
    }

    pub fn from_relative_str(path: &str) -> Self {
        Self::new(RelativePathBuf::from(path))
    }

    pub fn relative_path(&self) -> &RelativePath {
        &self.relative_path
    }

    /// File name without directory or extension.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Relative path without the extension, for titles.
    pub fn display_path(&self) -> &str {
        &self.display_path
    }

    pub fn extension(&self) -> Option<&str> {
        self.relative_path.extension()
    }
}

impl From<RelativePathBuf> for SourceFile {
    fn from(path: RelativePathBuf) -> Self {
        Self::new(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_extension_for_display() {
        let file = SourceFile::from_relative_str("lib/widgets/tree.magik");
        assert_eq!(file.display_name(), "tree");
        assert_eq!(file.display_path(), "lib/widgets/tree");
        assert_eq!(file.extension(), Some("magik"));
    }

    #[test]
    fn handles_extensionless_files() {
        let file = SourceFile::from_relative_str("Makefile");
        assert_eq!(file.display_name(), "Makefile");
        assert_eq!(file.display_path(), "Makefile");
        assert_eq!(file.extension(), None);
    }
}
