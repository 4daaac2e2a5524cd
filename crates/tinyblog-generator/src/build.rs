//! Build orchestration.
//!
//! A build checks the theme, resets the output directory, copies static files
//! and the stylesheet, renders every markdown post and finally writes the table
//! of contents. Nothing in the output directory is touched until the theme and
//! its layout have been validated.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
    time::Instant,
};

use chrono::Local;
use thiserror::Error;
use tinyblog_core::{
    BuildLog, CoreError, LogCategory, PostDefaults, Settings, SourceFile,
    settings::{LAYOUT_NAME, STYLESHEET_NAME},
};
use tracing::{debug, info};

use crate::{
    layout::{Layout, LayoutError},
    markdown::MarkdownRenderer,
    output::{OutputDir, OutputError},
    post::RawPost,
    toc::{INDEX_FILE, TableOfContents},
};

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The `themes` directory does not exist.
    #[error("Themes folder not found: {}", path.display())]
    ThemeFolderNotFound { path: PathBuf },

    /// The selected theme directory does not exist.
    #[error("Theme '{theme}' not found.")]
    ThemeNotFound { theme: String },

    /// The theme has no layout file.
    #[error("{} not found in theme folder {}.", LAYOUT_NAME, theme_dir.display())]
    LayoutNotFound { theme_dir: PathBuf },

    /// The theme has no stylesheet.
    #[error("{} not found in theme folder {}.", STYLESHEET_NAME, theme_dir.display())]
    StylesheetNotFound { theme_dir: PathBuf },

    /// Layout error.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Settings, source or front matter error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Output staging error.
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Build statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Number of post pages written, hidden ones included.
    pub posts: usize,

    /// Number of written posts left out of the table of contents.
    pub hidden: usize,

    /// Number of posts skipped because they are unpublished.
    pub unpublished: usize,

    /// Number of static files copied from the input directory.
    pub assets: usize,

    /// Whether `index.html` was written.
    pub index: bool,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// Theme files checked before a build starts.
#[derive(Debug, Clone)]
struct ThemeFiles {
    layout: PathBuf,
    stylesheet: PathBuf,
}

/// Blog builder that orchestrates the build process.
pub struct Builder {
    settings: Settings,
    root: PathBuf,
    markdown: MarkdownRenderer,
    log: Arc<dyn BuildLog>,
}

impl fmt::Debug for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("settings", &self.settings)
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl Builder {
    /// Create a builder for the project at `root`.
    #[must_use]
    pub fn new(settings: Settings, root: impl Into<PathBuf>, log: Arc<dyn BuildLog>) -> Self {
        Self {
            settings,
            root: root.into(),
            markdown: MarkdownRenderer::new(),
            log,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn log(&self) -> &Arc<dyn BuildLog> {
        &self.log
    }

    #[must_use]
    pub fn input_dir(&self) -> PathBuf {
        self.settings.input_path(&self.root)
    }

    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.settings.output_path(&self.root)
    }

    #[must_use]
    pub fn theme_dir(&self) -> PathBuf {
        self.settings.theme_path(&self.root)
    }

    /// Execute the full build process.
    pub fn build(&self) -> Result<BuildStats> {
        let start = Instant::now();
        let now = Local::now().fixed_offset();
        let mut stats = BuildStats::default();
        let log = self.log.as_ref();

        info!(
            input = %self.input_dir().display(),
            output = %self.output_dir().display(),
            theme = self.settings.theme(),
            "starting build"
        );

        // 1. Theme checks and layout validation, before any output mutation
        let theme = self.check_theme()?;
        let layout = Layout::load(&theme.layout, log)?;

        // 2. Reset output directory
        let output = OutputDir::new(self.output_dir());
        output.clear()?;

        // 3. Static files and stylesheet
        let sources = self.list_sources()?;
        for source in sources.iter().filter(|s| !s.is_markdown()) {
            output.copy_file(source.path())?;
            log.emit(LogCategory::Copy, &format!("Copied {}", source.file_name()));
            stats.assets += 1;
        }
        output.copy_file(&theme.stylesheet)?;
        log.emit(LogCategory::Copy, &format!("Copied {STYLESHEET_NAME}"));

        // 4. Posts
        let defaults = PostDefaults {
            default_author: self.settings.default_author(),
            now,
        };
        let mut posts = Vec::new();
        for source in sources.into_iter().filter(SourceFile::is_markdown) {
            let post = RawPost::read(source)?
                .parse(&defaults, log)?
                .render(&layout, &self.markdown, now);

            if post.is_published() {
                let name = post.output_file_name();
                output.write(&name, post.html())?;
                log.emit(
                    LogCategory::Build,
                    &format!("{} -> {name}", post.source().file_name()),
                );
                stats.posts += 1;
                if post.is_hidden() {
                    stats.hidden += 1;
                }
            } else {
                debug!(file = %post.source().path().display(), "skipping unpublished post");
                stats.unpublished += 1;
            }

            posts.push(post);
        }

        // 5. Table of contents
        if self.settings.generate_table_of_contents() {
            let mut toc = TableOfContents::new();
            for post in posts.iter().filter(|p| p.is_listed()) {
                toc.register(post);
            }
            output.write(
                INDEX_FILE,
                &toc.render(&layout, self.settings.default_author(), now),
            )?;
            log.emit(LogCategory::Info, "Generated table of contents.");
            stats.index = true;
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        log.emit(
            LogCategory::Success,
            &format!("Build completed in {}ms.", stats.duration_ms),
        );

        debug!(?stats, "build complete");
        Ok(stats)
    }

    /// Check, in order, the themes folder, the theme, its layout and its stylesheet.
    fn check_theme(&self) -> Result<ThemeFiles> {
        let themes = Settings::themes_path(&self.root);
        if !themes.is_dir() {
            return Err(BuildError::ThemeFolderNotFound { path: themes });
        }

        let theme_dir = self.theme_dir();
        if !theme_dir.is_dir() {
            return Err(BuildError::ThemeNotFound {
                theme: self.settings.theme().to_string(),
            });
        }

        let layout = theme_dir.join(LAYOUT_NAME);
        if !layout.is_file() {
            return Err(BuildError::LayoutNotFound { theme_dir });
        }

        let stylesheet = theme_dir.join(STYLESHEET_NAME);
        if !stylesheet.is_file() {
            return Err(BuildError::StylesheetNotFound { theme_dir });
        }

        Ok(ThemeFiles { layout, stylesheet })
    }

    /// Top-level files of the input directory. A missing directory has none.
    fn list_sources(&self) -> Result<Vec<SourceFile>> {
        let input = self.input_dir();
        if !input.is_dir() {
            self.log.warning(&format!(
                "Input directory {} not found, nothing to build.",
                input.display()
            ));
            return Ok(Vec::new());
        }
        Ok(SourceFile::list(&input)?)
    }
}
