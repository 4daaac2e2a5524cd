//! Blog settings management.
//!
//! Settings live in `settings.yml` at the project root, with camelCase keys:
//!
//! ```yaml
//! blogName: My blog
//! inputDirectory: src
//! outputDirectory: dist
//! theme: default
//! defaultAuthor: Anonymous
//! generateTableOfContents: true
//! ```
//!
//! Every string field must be non-empty. A [`Settings`] value that exists has
//! already passed that check.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, Result};

/// File name of the settings file inside the project root.
pub const SETTINGS_FILE: &str = "settings.yml";

/// Directory holding all themes, relative to the project root.
pub const THEMES_FOLDER: &str = "themes";

/// Layout template file name inside a theme.
pub const LAYOUT_NAME: &str = "layout.html";

/// Stylesheet file name inside a theme; copied verbatim to the output.
pub const STYLESHEET_NAME: &str = "style.css";

/// Validated blog settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    blog_name: String,
    input_directory: String,
    output_directory: String,
    theme: String,
    default_author: String,
    generate_table_of_contents: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            blog_name: "Untitled blog".to_string(),
            input_directory: "src".to_string(),
            output_directory: "dist".to_string(),
            theme: "default".to_string(),
            default_author: "Anonymous".to_string(),
            generate_table_of_contents: true,
        }
    }
}

impl Settings {
    /// Build settings from explicit values, rejecting empty fields.
    pub fn new(
        blog_name: impl Into<String>,
        input_directory: impl Into<String>,
        output_directory: impl Into<String>,
        theme: impl Into<String>,
        default_author: impl Into<String>,
        generate_table_of_contents: bool,
    ) -> Result<Self> {
        let settings = Self {
            blog_name: blog_name.into(),
            input_directory: input_directory.into(),
            output_directory: output_directory.into(),
            theme: theme.into(),
            default_author: default_author.into(),
            generate_table_of_contents,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from YAML text. Missing keys take their default value.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let settings: Self = if text.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(text)?
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from `settings.yml` in the given project root.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(SETTINGS_FILE);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CoreError::SettingsNotFound { path });
            }
            Err(e) => return Err(e.into()),
        };

        let settings = match Self::from_yaml(&text) {
            Err(CoreError::Yaml(source)) => {
                return Err(CoreError::MalformedSettings { path, source });
            }
            other => other?,
        };

        debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    /// Write these settings to `settings.yml` in the given project root.
    pub fn save(&self, root: &Path) -> Result<()> {
        let path = root.join(SETTINGS_FILE);
        fs::write(&path, serde_yaml::to_string(self)?)?;
        debug!(path = %path.display(), "saved settings");
        Ok(())
    }

    /// Whether a settings file exists in the given project root.
    #[must_use]
    pub fn exists_in(root: &Path) -> bool {
        root.join(SETTINGS_FILE).is_file()
    }

    /// Check that every string field is non-empty after trimming.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("blogName", &self.blog_name),
            ("inputDirectory", &self.input_directory),
            ("outputDirectory", &self.output_directory),
            ("theme", &self.theme),
            ("defaultAuthor", &self.default_author),
        ];

        match fields.into_iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(CoreError::EmptySetting { field }),
            None => Ok(()),
        }
    }

    #[must_use]
    pub fn blog_name(&self) -> &str {
        &self.blog_name
    }

    #[must_use]
    pub fn input_directory(&self) -> &str {
        &self.input_directory
    }

    #[must_use]
    pub fn output_directory(&self) -> &str {
        &self.output_directory
    }

    #[must_use]
    pub fn theme(&self) -> &str {
        &self.theme
    }

    #[must_use]
    pub fn default_author(&self) -> &str {
        &self.default_author
    }

    #[must_use]
    pub fn generate_table_of_contents(&self) -> bool {
        self.generate_table_of_contents
    }

    /// Input directory resolved against the project root.
    #[must_use]
    pub fn input_path(&self, root: &Path) -> PathBuf {
        root.join(&self.input_directory)
    }

    /// Output directory resolved against the project root.
    #[must_use]
    pub fn output_path(&self, root: &Path) -> PathBuf {
        root.join(&self.output_directory)
    }

    /// Root of all themes, resolved against the project root.
    #[must_use]
    pub fn themes_path(root: &Path) -> PathBuf {
        root.join(THEMES_FOLDER)
    }

    /// Directory of the selected theme, resolved against the project root.
    #[must_use]
    pub fn theme_path(&self, root: &Path) -> PathBuf {
        Self::themes_path(root).join(&self.theme)
    }
}
