//! Theme layout with literal placeholder substitution.
//!
//! A layout is plain HTML containing `{{ name }}` tokens, with exactly one
//! space on each side of the name. Rendering replaces each known token with
//! its value in a single left-to-right pass, so an inserted value is never
//! expanded again. Unknown `{{ ... }}` sequences are left as they are.

use std::{
    borrow::Cow,
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, FixedOffset};
use thiserror::Error;
use tinyblog_core::BuildLog;

/// Format used for the `date` and `now` placeholders.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %:z";

/// Layout errors.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// A required placeholder does not appear in the layout text.
    #[error("Placeholder '{{{{ {name} }}}}' is missing in layout.")]
    MissingPlaceholder { name: &'static str },

    /// The layout file could not be read.
    #[error("failed to read layout {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for layout operations.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Placeholders understood by the layout renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    Title,
    Author,
    Date,
    Content,
    Now,
    Year,
}

impl Placeholder {
    pub const ALL: [Self; 6] = [
        Self::Title,
        Self::Author,
        Self::Date,
        Self::Content,
        Self::Now,
        Self::Year,
    ];

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::Date => "date",
            Self::Content => "content",
            Self::Now => "now",
            Self::Year => "year",
        }
    }

    /// The literal token as it appears in a layout.
    #[must_use]
    pub fn token(&self) -> &'static str {
        match self {
            Self::Title => "{{ title }}",
            Self::Author => "{{ author }}",
            Self::Date => "{{ date }}",
            Self::Content => "{{ content }}",
            Self::Now => "{{ now }}",
            Self::Year => "{{ year }}",
        }
    }

    /// Whether a layout without this placeholder is rejected.
    #[must_use]
    pub fn is_required(&self) -> bool {
        matches!(self, Self::Title | Self::Content)
    }
}

/// Values substituted into a layout for one page.
#[derive(Debug, Clone, Copy)]
pub struct Substitutions<'a> {
    pub title: &'a str,
    pub author: &'a str,
    pub date: DateTime<FixedOffset>,
    /// Already converted to HTML.
    pub content: &'a str,
    pub now: DateTime<FixedOffset>,
}

impl<'a> Substitutions<'a> {
    /// Value for a placeholder.
    #[must_use]
    pub fn value(&self, placeholder: Placeholder) -> Cow<'a, str> {
        match placeholder {
            Placeholder::Title => Cow::Borrowed(self.title),
            Placeholder::Author => Cow::Borrowed(self.author),
            Placeholder::Content => Cow::Borrowed(self.content),
            Placeholder::Date => Cow::Owned(self.date.format(DATE_FORMAT).to_string()),
            Placeholder::Now => Cow::Owned(self.now.format(DATE_FORMAT).to_string()),
            Placeholder::Year => Cow::Owned(self.now.format("%Y").to_string()),
        }
    }
}

/// A validated layout template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    text: String,
}

impl Layout {
    /// Validate layout text.
    ///
    /// Fails if `title` or `content` is missing; logs a warning for each other
    /// missing placeholder.
    pub fn from_text(text: impl Into<String>, log: &dyn BuildLog) -> Result<Self> {
        let text = text.into();

        if let Some(missing) = Placeholder::ALL
            .iter()
            .find(|p| p.is_required() && !text.contains(p.token()))
        {
            return Err(LayoutError::MissingPlaceholder {
                name: missing.name(),
            });
        }

        for optional in Placeholder::ALL
            .iter()
            .filter(|p| !p.is_required() && !text.contains(p.token()))
        {
            log.warning(&format!(
                "Placeholder '{}' is missing in layout.",
                optional.token()
            ));
        }

        Ok(Self { text })
    }

    /// Read and validate a layout file.
    pub fn load(path: &Path, log: &dyn BuildLog) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| LayoutError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_text(text, log)
    }

    /// The raw template text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Render the layout with the given values.
    #[must_use]
    pub fn render(&self, substitutions: &Substitutions<'_>) -> String {
        let mut result = String::with_capacity(self.text.len() + substitutions.content.len());
        let mut rest = self.text.as_str();

        while let Some(start) = rest.find("{{") {
            result.push_str(&rest[..start]);
            let candidate = &rest[start..];

            match Placeholder::ALL
                .iter()
                .find(|p| candidate.starts_with(p.token()))
            {
                Some(placeholder) => {
                    result.push_str(&substitutions.value(*placeholder));
                    rest = &candidate[placeholder.token().len()..];
                }
                None => {
                    result.push('{');
                    rest = &candidate[1..];
                }
            }
        }

        result.push_str(rest);
        result
    }
}
