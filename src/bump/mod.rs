//! Commit-driven version bumping.
//!
//! A single linear computation with no state between runs:
//! - resolve the commit message (argument, else `git log -1`, else empty)
//! - classify it into a [`BumpLevel`]
//! - bump the manifest's version and write it back

pub mod commit;
pub mod level;
pub mod manifest;
pub mod version;

use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::BumpError;

pub use commit::{last_commit_message, resolve_message};
pub use level::{classify, BumpLevel};
pub use manifest::{Manifest, DEFAULT_VERSION};
pub use version::{bump_version, Version};

/// Inputs for one bump run.
#[derive(Debug, Clone)]
pub struct BumpRequest {
    /// Manifest file to rewrite.
    pub manifest: PathBuf,
    /// Override message. Empty means "ask git".
    pub message: String,
    /// Directory git is run in.
    pub repo: PathBuf,
    /// Compute only, leave the manifest untouched.
    pub dry_run: bool,
}

impl BumpRequest {
    /// Request for `manifest` using the current directory's history.
    pub fn new(manifest: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            manifest: manifest.into(),
            message: message.into(),
            repo: PathBuf::from("."),
            dry_run: false,
        }
    }
}

/// What a bump run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpReport {
    /// Message that was classified.
    pub message: String,
    /// Resulting level.
    pub level: BumpLevel,
    /// Version before the bump.
    pub previous: String,
    /// Version after the bump.
    pub next: String,
    /// Whether the manifest was rewritten.
    pub written: bool,
}

impl BumpReport {
    /// The two stdout lines: `NEW_VERSION=<v>` for CI tooling, then `<v>`.
    pub fn output_lines(&self) -> [String; 2] {
        [format!("NEW_VERSION={}", self.next), self.next.clone()]
    }
}

/// Run one bump.
pub fn run(request: &BumpRequest) -> Result<BumpReport, BumpError> {
    let message = resolve_message(&request.message, &request.repo);
    let level = classify(&message);
    debug!(level = %level, "Classified commit message {:?}", message);

    let mut manifest = Manifest::load(&request.manifest)?;
    let previous = manifest.version()?;
    let next = bump_version(&previous, level)?;

    manifest.set_version(next.clone());
    if request.dry_run {
        info!("Dry run: {} -> {} ({}), manifest untouched", previous, next, level);
    } else {
        manifest.save()?;
        info!(
            "Bumped {} -> {} ({}) in {}",
            previous,
            next,
            level,
            manifest.path().display()
        );
    }

    Ok(BumpReport {
        message,
        level,
        previous,
        next,
        written: !request.dry_run,
    })
}
