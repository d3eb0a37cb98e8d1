//! Build artifact cleanup functionality.
//!
//! This module removes dependency and build output entries (see
//! [`CLEAN_EXCLUDE`](crate::exclusions::CLEAN_EXCLUDE)) anywhere under the
//! project root. Every removal is attempted independently: a failure is
//! recorded and reported, and the remaining entries are still processed.

use std::{
    fs,
    path::{Path, PathBuf},
};

use humansize::{DECIMAL, format_size};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;
use walkdir::WalkDir;

use crate::{config::Style, exclusions::is_clean_excluded};

/// A single artifact that was removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemovedPath {
    pub path: PathBuf,

    /// Bytes reclaimed, measured just before removal
    pub size: u64,
}

/// Result of a cleanup run.
#[derive(Debug, Default)]
pub struct CleanResult {
    /// Entries removed successfully, in traversal order
    pub removed: Vec<RemovedPath>,

    /// Human-readable messages for entries that could not be removed
    pub errors: Vec<String>,
}

impl CleanResult {
    #[must_use]
    pub fn freed(&self) -> u64 {
        self.removed.iter().map(|r| r.size).sum()
    }
}

/// Removes build artifacts from a project tree.
pub struct Cleaner {
    style: Style,

    /// When `true`, nothing is printed and no progress bar is drawn.
    quiet: bool,
}

impl Cleaner {
    #[must_use]
    pub const fn new(style: Style) -> Self {
        Self {
            style,
            quiet: false,
        }
    }

    #[must_use]
    pub const fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Collect every artifact under `root`, walking top-down.
    ///
    /// A matching directory is returned without descending into it, so
    /// nested matches inside an artifact are never listed separately. The
    /// root itself is never a target. Entries that cannot be read are skipped.
    #[must_use]
    pub fn find_targets(root: &Path) -> Vec<PathBuf> {
        let mut targets = Vec::new();
        let mut walker = WalkDir::new(root).min_depth(1).into_iter();

        while let Some(entry) = walker.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("Skipping unreadable entry: {e}");
                    continue;
                }
            };

            if !is_clean_excluded(&entry.file_name().to_string_lossy()) {
                continue;
            }

            if entry.file_type().is_dir() {
                walker.skip_current_dir();
            }
            targets.push(entry.into_path());
        }

        targets
    }

    /// Remove every artifact under `root`.
    pub fn clean(&self, root: &Path) -> CleanResult {
        self.say(&self.style.info("Cleaning project..."));

        let targets = Self::find_targets(root);
        let progress = if self.quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(targets.len() as u64);
            pb.set_style(progress_style());
            pb
        };

        let mut result = CleanResult::default();

        for path in targets {
            match remove_entry(&path) {
                Ok(Some(size)) => {
                    progress.suspend(|| {
                        self.say(&self.style.success(&format!("Removed: {}", path.display())));
                    });
                    result.removed.push(RemovedPath { path, size });
                }
                Ok(None) => debug!("Already gone: {}", path.display()),
                Err(e) => {
                    let message = format!("Failed to remove {}: {e}", path.display());
                    progress.suspend(|| self.say(&self.style.error(&message)));
                    result.errors.push(message);
                }
            }
            progress.inc(1);
        }

        progress.finish_and_clear();
        self.say(&self.style.success("Clean complete."));

        result
    }

    /// Print the totals of a cleanup run.
    pub fn print_summary(&self, result: &CleanResult) {
        if self.quiet {
            return;
        }

        println!("\nCleanup Summary:");
        println!(
            "  Removed: {} entries",
            self.style.success(&result.removed.len().to_string())
        );

        if !result.errors.is_empty() {
            println!(
                "  Failed:  {} entries",
                self.style.error(&result.errors.len().to_string())
            );
        }

        println!(
            "  Space freed: {}",
            self.style.success(&format_size(result.freed(), DECIMAL))
        );
    }

    fn say(&self, line: &str) {
        if !self.quiet {
            println!("{line}");
        }
    }
}

/// Remove one artifact, returning the bytes it occupied.
///
/// Directories are removed recursively; files and symlinks are removed as a
/// single entry (a symlink's target is left alone). Returns `Ok(None)` when
/// the entry has already disappeared.
fn remove_entry(path: &Path) -> std::io::Result<Option<u64>> {
    let Ok(metadata) = fs::symlink_metadata(path) else {
        return Ok(None);
    };

    if metadata.is_dir() {
        let size = calculate_directory_size(path);
        fs::remove_dir_all(path)?;
        Ok(Some(size))
    } else {
        fs::remove_file(path)?;
        Ok(Some(metadata.len()))
    }
}

/// Calculate the total size of a directory and all its contents.
///
/// Files that cannot be accessed are skipped.
fn calculate_directory_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|metadata| metadata.len())
        .sum()
}

const PROGRESS_TEMPLATE: &str = "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}";

fn progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template(PROGRESS_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
}
