//! Build command - generates the blog once

use std::{path::Path, sync::Arc};

use color_eyre::eyre::Result;
use tinyblog_core::{Settings, TracingLog};
use tinyblog_generator::{BuildStats, Builder};

/// Run the build command.
///
/// Loads `settings.yml` from `root` and builds the blog into its output directory.
pub fn run(root: &Path) -> Result<BuildStats> {
    tracing::debug!(?root, "Starting build");

    let settings = Settings::load(root)?;
    let builder = Builder::new(settings, root, Arc::new(TracingLog));
    let stats = builder.build()?;

    tracing::debug!(?stats, "Build finished");
    Ok(stats)
}
