//! Watch command - rebuild on every change

use std::{path::Path, sync::Arc, time::Duration};

use color_eyre::eyre::Result;
use tinyblog_core::{Settings, TracingLog};
use tinyblog_generator::{
    Builder, RebuildPolicy, WatchCoordinator, WatchOptions, WatchSummary,
};

/// Run the watch command.
///
/// Builds once, then rebuilds after each change to a post or the theme until
/// Ctrl+C is pressed.
pub async fn run(root: &Path, settle: Duration, per_event: bool) -> Result<WatchSummary> {
    tracing::debug!(?root, ?settle, per_event, "Starting watch mode");

    let settings = Settings::load(root)?;
    let builder = Builder::new(settings, root, Arc::new(TracingLog));
    let options = WatchOptions {
        settle,
        policy: if per_event {
            RebuildPolicy::PerEvent
        } else {
            RebuildPolicy::Debounced
        },
    };

    let summary = WatchCoordinator::new(builder, options)
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        })
        .await?;

    tracing::debug!(?summary, "Watch finished");
    Ok(summary)
}
