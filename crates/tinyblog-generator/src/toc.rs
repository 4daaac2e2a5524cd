//! Table of contents page.

use std::fmt::Write;

use chrono::{DateTime, FixedOffset};

use crate::{
    layout::{Layout, Substitutions},
    post::RenderedPost,
};

/// Page title of the table of contents.
pub const TOC_TITLE: &str = "Table of contents";

/// File name the table of contents is written to.
pub const INDEX_FILE: &str = "index.html";

/// Posts collected during one build, rendered as the index page.
///
/// Holds references only; the build owns the posts.
#[derive(Debug, Default)]
pub struct TableOfContents<'a> {
    posts: Vec<&'a RenderedPost>,
}

impl<'a> TableOfContents<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a post in registration order.
    pub fn register(&mut self, post: &'a RenderedPost) {
        self.posts.push(post);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Listed posts, newest first. Posts with equal dates keep registration order.
    #[must_use]
    pub fn entries(&self) -> Vec<&'a RenderedPost> {
        let mut entries: Vec<_> = self
            .posts
            .iter()
            .copied()
            .filter(|post| post.is_listed())
            .collect();
        entries.sort_by(|a, b| b.date().cmp(&a.date()));
        entries
    }

    /// The listing fragment placed in the layout's `content`. Titles are
    /// inserted as written, markup included.
    #[must_use]
    pub fn listing_html(&self) -> String {
        let mut html = format!("<h2>{TOC_TITLE}</h2><ul>");
        for post in self.entries() {
            let _ = write!(
                html,
                r#"<li><a href="{}">{}</a></li>"#,
                post.output_file_name(),
                post.title()
            );
        }
        html.push_str("</ul>");
        html
    }

    /// Render the full index page.
    #[must_use]
    pub fn render(
        &self,
        layout: &Layout,
        default_author: &str,
        now: DateTime<FixedOffset>,
    ) -> String {
        let listing = self.listing_html();
        layout.render(&Substitutions {
            title: TOC_TITLE,
            author: default_author,
            date: now,
            content: &listing,
            now,
        })
    }
}

#[cfg(test)]
mod tests {
    use tinyblog_core::{MemoryLog, PostDefaults, SourceFile};

    use super::*;
    use crate::{markdown::MarkdownRenderer, post::RawPost};

    fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2025-01-01T00:00:00+00:00").unwrap()
    }

    fn post(stem: &str, header: &str) -> RenderedPost {
        let log = MemoryLog::new();
        let layout = Layout::from_text("{{ title }}{{ content }}", &log).unwrap();
        let defaults = PostDefaults {
            default_author: "Anonymous",
            now: now(),
        };
        RawPost::new(
            SourceFile::new(format!("src/{stem}.md")).unwrap(),
            format!("---\n{header}\n---\nBody"),
        )
        .parse(&defaults, &log)
        .unwrap()
        .render(&layout, &MarkdownRenderer::new(), now())
    }

    #[test]
    fn test_entries_sorted_newest_first() {
        let old = post("old", "title: Old\ndate: 2023-01-01T00:00:00+00:00");
        let new = post("new", "title: New\ndate: 2024-06-01T00:00:00+00:00");
        let mid = post("mid", "title: Mid\ndate: 2024-01-01T00:00:00+00:00");

        let mut toc = TableOfContents::new();
        toc.register(&old);
        toc.register(&new);
        toc.register(&mid);

        let titles: Vec<_> = toc.entries().iter().map(|p| p.title()).collect();
        assert_eq!(titles, vec!["New", "Mid", "Old"]);
    }

    #[test]
    fn test_equal_dates_keep_registration_order() {
        let first = post("first", "title: First\ndate: 2024-01-01T00:00:00+00:00");
        let second = post("second", "title: Second\ndate: 2024-01-01T00:00:00+00:00");
        let third = post("third", "title: Third\ndate: 2024-01-01T00:00:00+00:00");

        let mut toc = TableOfContents::new();
        toc.register(&second);
        toc.register(&first);
        toc.register(&third);

        let titles: Vec<_> = toc.entries().iter().map(|p| p.title()).collect();
        assert_eq!(titles, vec!["Second", "First", "Third"]);
    }

    #[test]
    fn test_unlisted_posts_are_filtered() {
        let shown = post("shown", "title: Shown\ndate: 2024-01-01");
        let hidden = post("hidden", "title: Hidden\ndate: 2024-01-01\nhidden: true");
        let draft = post("draft", "title: Draft\ndate: 2024-01-01\npublished: false");

        let mut toc = TableOfContents::new();
        toc.register(&shown);
        toc.register(&hidden);
        toc.register(&draft);

        assert_eq!(toc.len(), 3);
        assert_eq!(toc.entries().len(), 1);
        let html = toc.listing_html();
        assert!(html.contains("Shown"));
        assert!(!html.contains("Hidden"));
        assert!(!html.contains("Draft"));
    }

    #[test]
    fn test_listing_html() {
        let a = post("a", "title: A\ndate: 2024-01-01T00:00:00+00:00");
        let b = post("b", "title: B\ndate: 2024-06-01T00:00:00+00:00");

        let mut toc = TableOfContents::new();
        toc.register(&a);
        toc.register(&b);

        assert_eq!(
            toc.listing_html(),
            r#"<h2>Table of contents</h2><ul><li><a href="b.html">B</a></li><li><a href="a.html">A</a></li></ul>"#
        );
    }

    #[test]
    fn test_listing_inserts_titles_verbatim() {
        let fish = post("fish", "title: Fish & <b>Chips</b>\ndate: 2024-01-01");

        let mut toc = TableOfContents::new();
        toc.register(&fish);

        assert!(
            toc.listing_html()
                .contains(r#"<li><a href="fish.html">Fish & <b>Chips</b></a></li>"#)
        );
    }

    #[test]
    fn test_render_through_layout() {
        let log = MemoryLog::new();
        let layout = Layout::from_text("<title>{{ title }}</title>{{ author }}|{{ content }}", &log).unwrap();
        let toc = TableOfContents::new();

        assert!(toc.is_empty());
        assert_eq!(
            toc.render(&layout, "Anonymous", now()),
            "<title>Table of contents</title>Anonymous|<h2>Table of contents</h2><ul></ul>"
        );
    }
}
