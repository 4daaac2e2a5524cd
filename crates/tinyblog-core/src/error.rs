//! Error types for the tinyblog core library.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error types for tinyblog.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A required settings field is empty or whitespace.
    #[error("Parameter '{field}' is empty")]
    EmptySetting { field: &'static str },

    /// No settings file in the project root.
    #[error("No settings file found at {}. Run 'tinyblog init' to create one.", path.display())]
    SettingsNotFound { path: PathBuf },

    /// The settings file exists but is not valid YAML for the settings record.
    #[error("Settings file {} is malformed: {source}", path.display())]
    MalformedSettings {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `init` was run in a directory that already has settings.
    #[error("Blog already initialized at {}. Use --force to overwrite.", path.display())]
    AlreadyInitialized { path: PathBuf },

    /// A front matter `date` value that no supported format accepts.
    #[error("Invalid date '{value}' in {}", path.display())]
    InvalidDate { path: PathBuf, value: String },

    /// File system I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CoreError {
    /// Create an invalid date error.
    pub fn invalid_date(path: impl Into<PathBuf>, value: impl Into<String>) -> Self {
        Self::InvalidDate {
            path: path.into(),
            value: value.into(),
        }
    }

    /// Whether this error means the project has not been initialized yet.
    #[must_use]
    pub fn is_settings_not_found(&self) -> bool {
        matches!(self, Self::SettingsNotFound { .. })
    }
}
