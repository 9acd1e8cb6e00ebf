//! kiln — render parsed content into a static site.
//!
//! # Usage
//!
//! ```text
//! kiln bake <source> --manifest <content.json> [--destination D] [--templates T] [--build-version V]
//! kiln templates <source> [--templates T]
//! ```
//!
//! Global `--verbose` switches the default log level to `debug`; `RUST_LOG`
//! overrides both.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{bake::BakeArgs, templates::TemplatesArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "kiln",
    version,
    about = "Render parsed content records into a static site",
    long_about = None,
)]
struct Cli {
    /// Log at debug level unless RUST_LOG is set.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render every record in a manifest, plus index, archive, feed and tag pages.
    Bake(BakeArgs),

    /// List the templates kiln would load for a site.
    Templates(TemplatesArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Bake(args) => args.run(),
        Commands::Templates(args) => args.run(),
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
