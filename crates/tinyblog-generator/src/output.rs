//! Output directory staging.
//!
//! The output directory is reset at the start of every build and then filled
//! with copied assets and rendered pages.

use std::{
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::debug;

/// Output errors.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Failed to reset the output directory.
    #[error("failed to clear output directory {}: {source}", path.display())]
    Clear {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to copy a file into the output directory.
    #[error("failed to copy {} to {}: {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a generated file.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source path has no file name to copy under.
    #[error("invalid source path: {}", .0.display())]
    InvalidPath(PathBuf),
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;

/// The directory a build writes into.
#[derive(Debug, Clone)]
pub struct OutputDir {
    path: PathBuf,
}

impl OutputDir {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the directory with all contents and create it empty.
    pub fn clear(&self) -> Result<()> {
        let clear = |source| OutputError::Clear {
            path: self.path.clone(),
            source,
        };

        if self.path.exists() {
            debug!(dir = %self.path.display(), "cleaning output directory");
            fs::remove_dir_all(&self.path).map_err(clear)?;
        }
        fs::create_dir_all(&self.path).map_err(clear)
    }

    /// Copy a file into the directory under its own name, overwriting.
    pub fn copy_file(&self, from: &Path) -> Result<PathBuf> {
        let name = from
            .file_name()
            .ok_or_else(|| OutputError::InvalidPath(from.to_path_buf()))?;
        let to = self.path.join(name);

        fs::copy(from, &to).map_err(|source| OutputError::Copy {
            from: from.to_path_buf(),
            to: to.clone(),
            source,
        })?;

        debug!(src = %from.display(), dest = %to.display(), "copied file");
        Ok(to)
    }

    /// Write text to a file in the directory, overwriting.
    pub fn write(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.path.join(name);
        fs::write(&path, contents).map_err(|source| OutputError::Write {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), bytes = contents.len(), "wrote file");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_clear_removes_previous_contents() {
        let dir = TempDir::new().unwrap();
        let out = OutputDir::new(dir.path().join("dist"));
        fs::create_dir_all(out.path().join("nested")).unwrap();
        fs::write(out.path().join("stale.html"), "old").unwrap();
        fs::write(out.path().join("nested/old.css"), "old").unwrap();

        out.clear().unwrap();

        assert!(out.path().is_dir());
        assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_clear_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let out = OutputDir::new(dir.path().join("a/b/dist"));

        out.clear().unwrap();
        assert!(out.path().is_dir());
    }

    #[test]
    fn test_copy_file_overwrites() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("logo.png");
        fs::write(&src, [1u8, 2, 3]).unwrap();

        let out = OutputDir::new(dir.path().join("dist"));
        out.clear().unwrap();
        fs::write(out.path().join("logo.png"), "stale").unwrap();

        let copied = out.copy_file(&src).unwrap();
        assert_eq!(copied, out.path().join("logo.png"));
        assert_eq!(fs::read(copied).unwrap(), vec![1u8, 2, 3]);
    }

    #[test]
    fn test_copy_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let out = OutputDir::new(dir.path());

        let err = out.copy_file(&dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, OutputError::Copy { .. }));
    }

    #[test]
    fn test_write() {
        let dir = TempDir::new().unwrap();
        let out = OutputDir::new(dir.path());

        let path = out.write("index.html", "<ul></ul>").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "<ul></ul>");
    }
}
