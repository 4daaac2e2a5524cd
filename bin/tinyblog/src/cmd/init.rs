//! Init command - create a new blog

use std::{fs, path::Path};

use color_eyre::eyre::Result;
use tinyblog_core::{
    BuildLog, CoreError, LogCategory, Settings, TracingLog,
    settings::{LAYOUT_NAME, STYLESHEET_NAME},
};

use super::build;

const DEFAULT_LAYOUT: &str = include_str!("../../assets/default/layout.html");
const DEFAULT_STYLESHEET: &str = include_str!("../../assets/default/style.css");
const WELCOME_POST: &str = include_str!("../../assets/default/welcome.md");

/// Options of the init command.
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Blog name; defaults to "Untitled blog".
    pub name: Option<String>,
    /// Default author; defaults to "Anonymous".
    pub author: Option<String>,
    /// Overwrite existing settings and starter files.
    pub force: bool,
}

/// Run the init command.
///
/// Writes `settings.yml`, the default theme and a welcome post under `root`,
/// then builds the new blog once.
pub fn run(root: &Path, options: &InitOptions) -> Result<Settings> {
    tracing::debug!(?root, ?options, "Initializing blog");
    let log = TracingLog;

    if Settings::exists_in(root) && !options.force {
        return Err(CoreError::AlreadyInitialized {
            path: root.to_path_buf(),
        }
        .into());
    }

    let defaults = Settings::default();
    let settings = Settings::new(
        options.name.as_deref().unwrap_or(defaults.blog_name()),
        defaults.input_directory(),
        defaults.output_directory(),
        defaults.theme(),
        options.author.as_deref().unwrap_or(defaults.default_author()),
        defaults.generate_table_of_contents(),
    )?;

    fs::create_dir_all(root)?;
    settings.save(root)?;
    log.emit(LogCategory::Info, "Creating default configuration file.");

    let input = settings.input_path(root);
    fs::create_dir_all(&input)?;
    write_starter(&input.join("welcome.md"), WELCOME_POST, options.force, &log)?;
    log.emit(LogCategory::Copy, "Creating src directory.");

    let theme = settings.theme_path(root);
    fs::create_dir_all(&theme)?;
    write_starter(&theme.join(LAYOUT_NAME), DEFAULT_LAYOUT, options.force, &log)?;
    write_starter(&theme.join(STYLESHEET_NAME), DEFAULT_STYLESHEET, options.force, &log)?;
    log.emit(LogCategory::Copy, "Creating themes directory.");

    log.emit(LogCategory::Success, "Initialized blog.");

    build::run(root)?;
    Ok(settings)
}

/// Write a starter file unless it exists and `force` is off.
fn write_starter(path: &Path, contents: &str, force: bool, log: &dyn BuildLog) -> Result<()> {
    if path.exists() && !force {
        tracing::debug!(?path, "Keeping existing file");
        return Ok(());
    }

    fs::write(path, contents)?;
    log.emit(LogCategory::Create, &path.display().to_string());
    Ok(())
}
