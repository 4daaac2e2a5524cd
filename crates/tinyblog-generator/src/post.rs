//! Post lifecycle.
//!
//! A post moves through three stages, each its own type:
//!
//! - [`RawPost`]: source file and its unparsed text.
//! - [`ParsedPost`]: front matter resolved, body stripped of the header.
//! - [`RenderedPost`]: final HTML produced through the layout.
//!
//! Each transition consumes the previous stage.

use chrono::{DateTime, FixedOffset};
use tinyblog_core::{
    BuildLog, FrontMatter, PostDefaults, Result, SourceFile, frontmatter::parse_front_matter,
};

use crate::{
    layout::{Layout, Substitutions},
    markdown::MarkdownRenderer,
};

/// A post whose text has been read but not parsed.
#[derive(Debug, Clone)]
pub struct RawPost {
    source: SourceFile,
    text: String,
}

impl RawPost {
    #[must_use]
    pub fn new(source: SourceFile, text: impl Into<String>) -> Self {
        Self {
            source,
            text: text.into(),
        }
    }

    /// Read the source file's text.
    pub fn read(source: SourceFile) -> Result<Self> {
        let text = source.read_text()?;
        Ok(Self::new(source, text))
    }

    #[must_use]
    pub fn source(&self) -> &SourceFile {
        &self.source
    }

    /// Extract the front matter.
    pub fn parse(self, defaults: &PostDefaults<'_>, log: &dyn BuildLog) -> Result<ParsedPost> {
        let (front_matter, body) = parse_front_matter(&self.text, &self.source, defaults, log)?;
        let body = body.to_string();

        Ok(ParsedPost {
            source: self.source,
            front_matter,
            body,
        })
    }
}

/// A post with resolved front matter and a header-free markdown body.
#[derive(Debug, Clone)]
pub struct ParsedPost {
    source: SourceFile,
    front_matter: FrontMatter,
    body: String,
}

impl ParsedPost {
    #[must_use]
    pub fn source(&self) -> &SourceFile {
        &self.source
    }

    #[must_use]
    pub fn front_matter(&self) -> &FrontMatter {
        &self.front_matter
    }

    /// Markdown body without the header block.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Convert the body to HTML and place it in the layout.
    #[must_use]
    pub fn render(
        self,
        layout: &Layout,
        markdown: &MarkdownRenderer,
        now: DateTime<FixedOffset>,
    ) -> RenderedPost {
        let content = markdown.to_html(&self.body);
        let html = layout.render(&Substitutions {
            title: &self.front_matter.title,
            author: &self.front_matter.author,
            date: self.front_matter.date,
            content: &content,
            now,
        });

        RenderedPost {
            source: self.source,
            front_matter: self.front_matter,
            html,
        }
    }
}

/// A post ready to be written.
#[derive(Debug, Clone)]
pub struct RenderedPost {
    source: SourceFile,
    front_matter: FrontMatter,
    html: String,
}

impl RenderedPost {
    #[must_use]
    pub fn source(&self) -> &SourceFile {
        &self.source
    }

    #[must_use]
    pub fn front_matter(&self) -> &FrontMatter {
        &self.front_matter
    }

    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.front_matter.title
    }

    #[must_use]
    pub fn date(&self) -> DateTime<FixedOffset> {
        self.front_matter.date
    }

    /// Unpublished posts are not written.
    #[must_use]
    pub fn is_published(&self) -> bool {
        self.front_matter.published
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.front_matter.hidden
    }

    /// Whether the post appears in the table of contents.
    #[must_use]
    pub fn is_listed(&self) -> bool {
        self.is_published() && !self.is_hidden()
    }

    /// `<stem>.html`
    #[must_use]
    pub fn output_file_name(&self) -> String {
        format!("{}.html", self.source.stem())
    }
}

#[cfg(test)]
mod tests {
    use tinyblog_core::{LogCategory, MemoryLog};

    use super::*;

    fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2025-01-01T00:00:00+00:00").unwrap()
    }

    fn render(file: &str, text: &str, log: &MemoryLog) -> RenderedPost {
        let layout = Layout::from_text("<title>{{ title }}</title>{{ content }}", log).unwrap();
        let defaults = PostDefaults {
            default_author: "Anonymous",
            now: now(),
        };

        RawPost::new(SourceFile::new(file).unwrap(), text)
            .parse(&defaults, log)
            .unwrap()
            .render(&layout, &MarkdownRenderer::new(), now())
    }

    #[test]
    fn test_parse_strips_header() {
        let log = MemoryLog::new();
        let defaults = PostDefaults {
            default_author: "Anonymous",
            now: now(),
        };
        let parsed = RawPost::new(
            SourceFile::new("src/a.md").unwrap(),
            "---\ntitle: A\ndate: 2024-01-01\n---\n\nHello *there*\n",
        )
        .parse(&defaults, &log)
        .unwrap();

        assert_eq!(parsed.front_matter().title, "A");
        assert_eq!(parsed.front_matter().author, "Anonymous");
        assert_eq!(parsed.body(), "Hello *there*");
        assert_eq!(parsed.source().stem(), "a");
    }

    #[test]
    fn test_render_uses_html_body() {
        let log = MemoryLog::new();
        let post = render("src/a.md", "---\ntitle: A\ndate: 2024-01-01\n---\nHello *there*", &log);

        assert_eq!(post.html(), "<title>A</title><p>Hello <em>there</em></p>\n");
        assert_eq!(post.output_file_name(), "a.html");
        assert!(post.is_listed());
    }

    #[test]
    fn test_hidden_post_is_published_but_unlisted() {
        let log = MemoryLog::new();
        let post = render("src/h.md", "---\ntitle: H\ndate: 2024-01-01\nhidden: true\n---\n", &log);

        assert!(post.is_published());
        assert!(post.is_hidden());
        assert!(!post.is_listed());
    }

    #[test]
    fn test_unpublished_post_is_unlisted() {
        let log = MemoryLog::new();
        let post = render("src/u.md", "---\ntitle: U\ndate: 2024-01-01\npublished: false\n---\n", &log);

        assert!(!post.is_published());
        assert!(!post.is_listed());
    }

    #[test]
    fn test_missing_date_defaults_to_now() {
        let log = MemoryLog::new();
        let post = render("src/n.md", "---\ntitle: N\n---\nBody", &log);

        assert_eq!(post.date(), now());
        assert!(log.contains(LogCategory::Warning, "n.md has no date"));
    }
}
