//! tinyblog CLI
//!
//! Builds a static blog from a directory of markdown posts and a theme.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use color_eyre::eyre::Result;
use tinyblog::cmd;

/// Command-line interface for tinyblog.
#[derive(Parser)]
#[command(
    name = "tinyblog",
    version,
    about = "A tiny markdown blog generator"
)]
struct Cli {
    /// Project root containing settings.yml
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Create a new blog in the project root and build it
    Init {
        /// The name of the blog
        #[arg(long)]
        name: Option<String>,
        /// The default author of the blog
        #[arg(long)]
        author: Option<String>,
        /// Overwrite existing settings and starter files
        #[arg(long)]
        force: bool,
    },
    /// Build the blog
    Build,
    /// Build, then rebuild whenever a post or the theme changes
    Watch {
        /// Delay between a change and the rebuild, in milliseconds
        #[arg(long, default_value_t = 250)]
        settle_ms: u64,
        /// Rebuild once per change event instead of once per burst
        #[arg(long)]
        per_event: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    tinyblog::init_tracing(cli.verbose);

    if let Err(report) = run(cli).await {
        tinyblog::report_failure(&report);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init {
            name,
            author,
            force,
        } => {
            let options = cmd::init::InitOptions {
                name,
                author,
                force,
            };
            cmd::init::run(&cli.root, &options)?;
        }
        Commands::Build => {
            cmd::build::run(&cli.root)?;
        }
        Commands::Watch {
            settle_ms,
            per_event,
        } => {
            cmd::watch::run(&cli.root, Duration::from_millis(settle_ms), per_event).await?;
        }
    }

    Ok(())
}
