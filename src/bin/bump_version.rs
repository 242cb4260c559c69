//! Bump the manifest version according to the last commit message.
//!
//! Prints `NEW_VERSION=<v>` and then `<v>` on stdout. Logs go to stderr.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use item_api::bump::{self, BumpRequest};
use item_api::error::AppError;

/// Bump a JSON manifest's version from a conventional commit message.
#[derive(Parser, Debug)]
#[command(name = "bump-version")]
#[command(version)]
struct Args {
    /// Commit message override. Defaults to the last commit's message.
    message: Vec<String>,

    /// Manifest file holding the `version` field.
    #[arg(long, env = "BUMP_MANIFEST", default_value = "package.json")]
    manifest: PathBuf,

    /// Repository to read the last commit from.
    #[arg(long, default_value = ".")]
    repo: PathBuf,

    /// Print the new version without rewriting the manifest.
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("item_api=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let request = BumpRequest {
        manifest: args.manifest,
        message: args.message.join(" "),
        repo: args.repo,
        dry_run: args.dry_run,
    };

    let report = bump::run(&request).map_err(AppError::from)?;
    for line in report.output_lines() {
        println!("{}", line);
    }

    Ok(())
}
