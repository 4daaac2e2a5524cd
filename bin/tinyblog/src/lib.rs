//! tinyblog CLI Library
//!
//! Command implementations for the tinyblog binary.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (init, build, watch)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use tinyblog::cmd;
//!
//! // Build the blog in the current directory
//! cmd::build::run(Path::new(".")).unwrap();
//! ```

use color_eyre::eyre::Report;
use tinyblog_core::CoreError;

pub mod cmd;

// Re-export core types for convenience
pub use tinyblog_core::Settings;
pub use tinyblog_generator::{BuildStats, Builder, WatchCoordinator};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = INFO, 1 = DEBUG, 2+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

/// Log a failed command as a single line.
///
/// A missing settings file is reported as a warning pointing at `tinyblog init`.
pub fn report_failure(report: &Report) {
    match report.downcast_ref::<CoreError>() {
        Some(err) if err.is_settings_not_found() => {
            tracing::warn!("No settings file found. Run 'tinyblog init' to create one.");
        }
        _ => tracing::error!("{report}"),
    }
}
