//! Annotated project tree with per-language line statistics.
//!
//! ## Main Parts
//!
//! - [`TreeReport`] - The rendered tree lines plus aggregate statistics
//! - [`TreeStats`] - Folder/file totals and per-language counts
//! - [`count_lines`] - Best-effort line counting for a single file

pub mod lines;
pub mod report;
mod walker;

pub use lines::{count_lines, count_lines_in};
pub use report::{FileStats, LanguageStats, TreeReport, TreeStats};
