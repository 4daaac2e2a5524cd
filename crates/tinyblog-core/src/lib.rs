//! tinyblog Core Library
//!
//! Settings, front matter, source files, error handling and the build log
//! capability shared by the tinyblog generator and CLI.

pub mod error;
pub mod frontmatter;
pub mod log;
pub mod settings;
pub mod source;

pub use error::{CoreError, Result};
pub use frontmatter::{FrontMatter, PostDefaults};
pub use log::{BuildLog, LogCategory, MemoryLog, TracingLog};
pub use settings::Settings;
pub use source::SourceFile;
