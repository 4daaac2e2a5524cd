//! Rebuild on file changes.
//!
//! [`WatchCoordinator`] runs one build, then watches the input directory
//! (markdown files only) and the theme directory (any file). A qualifying
//! change waits out a settle delay and triggers a rebuild. Rebuilds run one at
//! a time on a single worker that drains the event queue.

use std::{
    future::Future,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use notify::{
    Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher, event::ModifyKind,
};
use thiserror::Error;
use tinyblog_core::{LogCategory, source::MARKDOWN_EXTENSION};
use tokio::{
    sync::mpsc,
    time::{Instant, sleep},
};
use tracing::{debug, warn};

use crate::build::{BuildError, BuildStats, Builder};

/// Default pause between a change and the rebuild it triggers.
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(250);

/// Pending change events; further events are dropped while the queue is full.
const QUEUE_CAPACITY: usize = 16;

/// Watch errors.
#[derive(Debug, Error)]
pub enum WatchError {
    /// The initial build failed.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// Could not subscribe to change notifications.
    #[error("failed to watch {}: {source}", path.display())]
    Subscribe {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    /// Could not create the file watcher.
    #[error("file watcher error: {0}")]
    Watcher(#[from] notify::Error),

    /// A build task panicked.
    #[error("build task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Result type for watch operations.
pub type Result<T> = std::result::Result<T, WatchError>;

/// How queued change events turn into rebuilds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RebuildPolicy {
    /// Events arriving during the settle delay restart it; a burst of changes
    /// causes one rebuild.
    #[default]
    Debounced,

    /// Every queued event causes its own delayed rebuild.
    PerEvent,
}

/// Watch loop options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchOptions {
    pub settle: Duration,
    pub policy: RebuildPolicy,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            settle: DEFAULT_SETTLE,
            policy: RebuildPolicy::default(),
        }
    }
}

/// Rebuild counts of one watch session, initial build excluded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchSummary {
    /// Rebuilds run, failed ones included.
    pub rebuilds: usize,
    /// Rebuilds that ended in an error.
    pub failures: usize,
}

/// Debounced rebuild loop around a [`Builder`].
#[derive(Debug)]
pub struct WatchCoordinator {
    builder: Arc<Builder>,
    options: WatchOptions,
}

impl WatchCoordinator {
    #[must_use]
    pub fn new(builder: Builder, options: WatchOptions) -> Self {
        Self {
            builder: Arc::new(builder),
            options,
        }
    }

    #[must_use]
    pub fn options(&self) -> WatchOptions {
        self.options
    }

    /// Build, then rebuild on changes until `shutdown` completes.
    ///
    /// A failing initial build is returned as an error. Later build failures
    /// are logged and the loop keeps going. A rebuild in progress when
    /// `shutdown` fires runs to completion.
    pub async fn run<F>(self, shutdown: F) -> Result<WatchSummary>
    where
        F: Future<Output = ()>,
    {
        let log = Arc::clone(self.builder.log());

        let stats = self.build().await??;
        debug!(?stats, "initial build");

        let (tx, mut rx) = mpsc::channel(QUEUE_CAPACITY);
        let watcher = self.subscribe(tx)?;
        log.emit(
            LogCategory::Watch,
            &format!(
                "Watching {} for changes. Press Ctrl+C to stop.",
                self.builder.input_dir().display()
            ),
        );

        tokio::pin!(shutdown);
        let mut summary = WatchSummary::default();

        loop {
            let changed = tokio::select! {
                biased;
                () = &mut shutdown => break,
                event = rx.recv() => match event {
                    Some(path) => path,
                    None => break,
                },
            };
            debug!(path = %changed.display(), "change detected");

            // Settle
            let deadline = sleep(self.options.settle);
            tokio::pin!(deadline);
            let debounced = self.options.policy == RebuildPolicy::Debounced;
            let settled = loop {
                tokio::select! {
                    biased;
                    () = &mut shutdown => break false,
                    () = &mut deadline => break true,
                    Some(path) = rx.recv(), if debounced => {
                        debug!(path = %path.display(), "change during settle delay");
                        deadline.as_mut().reset(Instant::now() + self.options.settle);
                    }
                }
            };
            if !settled {
                break;
            }

            log.emit(
                LogCategory::Watch,
                &format!("{} changed, rebuilding...", display_name(&changed)),
            );
            summary.rebuilds += 1;
            if let Err(e) = self.build().await? {
                summary.failures += 1;
                log.error(&e.to_string());
            }
        }

        drop(watcher);
        log.emit(LogCategory::Watch, "Stopped watching.");
        debug!(?summary, "watch finished");
        Ok(summary)
    }

    /// Run a build on the blocking pool and wait for it.
    async fn build(
        &self,
    ) -> std::result::Result<std::result::Result<BuildStats, BuildError>, tokio::task::JoinError>
    {
        let builder = Arc::clone(&self.builder);
        tokio::task::spawn_blocking(move || builder.build()).await
    }

    /// Subscribe to the input and theme directories.
    fn subscribe(&self, tx: mpsc::Sender<PathBuf>) -> Result<RecommendedWatcher> {
        let input = canonical(&self.builder.input_dir());
        let theme = canonical(&self.builder.theme_dir());
        let filter = ChangeFilter {
            theme: theme.clone(),
        };

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if let Some(path) = filter.accept(&event) {
                        // A full queue already holds a pending rebuild.
                        let _ = tx.try_send(path);
                    }
                }
                Err(e) => warn!(error = %e, "file watcher error"),
            },
            notify::Config::default(),
        )?;

        if input.is_dir() {
            watcher
                .watch(&input, RecursiveMode::Recursive)
                .map_err(|source| WatchError::Subscribe {
                    path: input.clone(),
                    source,
                })?;
            debug!(dir = %input.display(), "watching input directory");
        } else {
            self.builder.log().warning(&format!(
                "Input directory {} not found, only the theme is watched. Restart watch after creating it.",
                input.display()
            ));
        }

        watcher
            .watch(&theme, RecursiveMode::Recursive)
            .map_err(|source| WatchError::Subscribe {
                path: theme.clone(),
                source,
            })?;
        debug!(dir = %theme.display(), "watching theme directory");

        Ok(watcher)
    }
}

/// Decides which change events trigger a rebuild.
#[derive(Debug, Clone)]
struct ChangeFilter {
    theme: PathBuf,
}

impl ChangeFilter {
    /// First path of a qualifying event: any theme file, or a markdown file
    /// elsewhere.
    fn accept(&self, event: &Event) -> Option<PathBuf> {
        if !is_change(&event.kind) {
            return None;
        }

        event
            .paths
            .iter()
            .find(|path| path.starts_with(&self.theme) || is_markdown(path))
            .cloned()
    }
}

fn is_change(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_)
            | EventKind::Remove(_)
            | EventKind::Modify(ModifyKind::Data(_) | ModifyKind::Name(_) | ModifyKind::Any)
    )
}

fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == MARKDOWN_EXTENSION)
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}
