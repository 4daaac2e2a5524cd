//! Categorized build log.
//!
//! The build engine and the watch loop report progress through a [`BuildLog`]
//! handed to them by the caller. [`TracingLog`] forwards to `tracing`;
//! [`MemoryLog`] keeps lines in memory so tests can inspect them.

use std::{
    fmt,
    sync::{Mutex, PoisonError},
};

use tracing::{error, info, warn};

/// Category of a build log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogCategory {
    Build,
    Info,
    Create,
    Copy,
    Success,
    Watch,
    Warning,
    Error,
}

impl LogCategory {
    /// Lowercase label used in log output.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Build => "build",
            Self::Info => "info",
            Self::Create => "create",
            Self::Copy => "copy",
            Self::Success => "success",
            Self::Watch => "watch",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sink for categorized log lines.
pub trait BuildLog: Send + Sync {
    /// Emit one line under the given category.
    fn emit(&self, category: LogCategory, message: &str);

    fn warning(&self, message: &str) {
        self.emit(LogCategory::Warning, message);
    }

    fn error(&self, message: &str) {
        self.emit(LogCategory::Error, message);
    }
}

/// Forwards log lines to the `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl BuildLog for TracingLog {
    fn emit(&self, category: LogCategory, message: &str) {
        match category {
            LogCategory::Warning => warn!(%category, "{message}"),
            LogCategory::Error => error!(%category, "{message}"),
            _ => info!(%category, "{message}"),
        }
    }
}

/// Collects log lines in memory.
#[derive(Debug, Default)]
pub struct MemoryLog {
    lines: Mutex<Vec<(LogCategory, String)>>,
}

impl MemoryLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All lines emitted so far, in order.
    #[must_use]
    pub fn lines(&self) -> Vec<(LogCategory, String)> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Messages emitted under one category, in order.
    #[must_use]
    pub fn messages(&self, category: LogCategory) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(c, _)| *c == category)
            .map(|(_, message)| message)
            .collect()
    }

    /// Whether any line of the category contains `needle`.
    #[must_use]
    pub fn contains(&self, category: LogCategory, needle: &str) -> bool {
        self.messages(category).iter().any(|m| m.contains(needle))
    }
}

impl BuildLog for MemoryLog {
    fn emit(&self, category: LogCategory, message: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((category, message.to_string()));
    }
}
