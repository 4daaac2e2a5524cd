//! Source files found in the input directory.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::Result;

/// Extension of markdown articles.
pub const MARKDOWN_EXTENSION: &str = "md";

/// A file in the input directory.
///
/// Identity is the absolute path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceFile {
    path: PathBuf,
    stem: String,
    extension: String,
}

impl SourceFile {
    /// Resolve a path into a source file.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = std::path::absolute(path.as_ref())?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            path,
            stem,
            extension,
        })
    }

    /// List the files directly inside `dir`, in directory enumeration order.
    ///
    /// Subdirectories are skipped, not descended into.
    pub fn list(dir: &Path) -> Result<Vec<Self>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() {
                files.push(Self::new(path)?);
            }
        }
        Ok(files)
    }

    /// Absolute path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Base name without extension.
    #[must_use]
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Extension without the dot; empty if the file has none.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// File name including extension.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Exact, case-sensitive match on `md`.
    #[must_use]
    pub fn is_markdown(&self) -> bool {
        self.extension == MARKDOWN_EXTENSION
    }

    /// Read the whole file as UTF-8 text.
    pub fn read_text(&self) -> Result<String> {
        Ok(fs::read_to_string(&self.path)?)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_source_file_parts() {
        let file = SourceFile::new("src/hello-world.md").unwrap();
        assert!(file.path().is_absolute());
        assert_eq!(file.stem(), "hello-world");
        assert_eq!(file.extension(), "md");
        assert_eq!(file.file_name(), "hello-world.md");
        assert!(file.is_markdown());
    }

    #[test]
    fn test_markdown_extension_is_case_sensitive() {
        let upper = SourceFile::new("src/NOTES.MD").unwrap();
        assert_eq!(upper.extension(), "MD");
        assert!(!upper.is_markdown());
    }

    #[test]
    fn test_source_file_without_extension() {
        let file = SourceFile::new("src/LICENSE").unwrap();
        assert_eq!(file.stem(), "LICENSE");
        assert_eq!(file.extension(), "");
        assert!(!file.is_markdown());
    }

    #[test]
    fn test_list_is_top_level_only() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.md"), "# A").unwrap();
        fs::write(dir.path().join("logo.png"), [0u8, 1, 2]).unwrap();
        fs::create_dir(dir.path().join("drafts")).unwrap();
        fs::write(dir.path().join("drafts/c.md"), "# C").unwrap();

        let mut names: Vec<_> = SourceFile::list(dir.path())
            .unwrap()
            .iter()
            .map(SourceFile::file_name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["a.md", "logo.png"]);
    }

    #[test]
    fn test_read_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("post.md");
        fs::write(&path, "---\ntitle: Hi\n---\nBody").unwrap();

        let file = SourceFile::new(&path).unwrap();
        assert_eq!(file.read_text().unwrap(), "---\ntitle: Hi\n---\nBody");
    }
}
