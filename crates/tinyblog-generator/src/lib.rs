//! tinyblog Generator Library
//!
//! Build engine and watch loop for tinyblog.
//!
//! # Modules
//!
//! - [`layout`] - Theme layout with `{{ name }}` placeholder substitution
//! - [`markdown`] - Markdown to HTML conversion
//! - [`post`] - Post lifecycle from raw text to rendered page
//! - [`toc`] - Table of contents page
//! - [`output`] - Output directory staging
//! - [`build`] - Build orchestration
//! - [`watch`] - Debounced rebuild on file changes

pub mod build;
pub mod layout;
pub mod markdown;
pub mod output;
pub mod post;
pub mod toc;
pub mod watch;

pub use build::{BuildError, BuildStats, Builder};
pub use layout::{Layout, Placeholder, Substitutions};
pub use markdown::MarkdownRenderer;
pub use output::OutputDir;
pub use post::{ParsedPost, RawPost, RenderedPost};
pub use toc::TableOfContents;
pub use watch::{RebuildPolicy, WatchCoordinator, WatchError, WatchOptions, WatchSummary};
