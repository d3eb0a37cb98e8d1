//! Tree report data structures and printing.

use std::{collections::BTreeMap, path::Path};

use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use super::walker::TreeWalker;
use crate::config::Style;

/// Line statistics for one language.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LanguageStats {
    /// Number of files recognized as this language
    pub files: usize,

    /// Sum of the line counts of those files
    pub lines: usize,
}

/// File totals of a tree report.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FileStats {
    /// Every listed file, whether or not its language is recognized
    pub total: usize,

    /// Per-language totals, ordered by language label
    pub by_type: BTreeMap<String, LanguageStats>,
}

/// Aggregate statistics of a tree report.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    /// Number of listed directories, excluding the root itself
    pub folders: usize,

    pub files: FileStats,
}

impl TreeStats {
    /// Record a listed file, with its language and line count when recognized.
    pub(crate) fn record_file(&mut self, language: Option<(&str, usize)>) {
        self.files.total += 1;

        if let Some((label, lines)) = language {
            let entry = self.files.by_type.entry(label.to_string()).or_default();
            entry.files += 1;
            entry.lines += lines;
        }
    }

    /// Statistics for one language label, if any file of it was listed.
    #[must_use]
    pub fn language(&self, label: &str) -> Option<LanguageStats> {
        self.files.by_type.get(label).copied()
    }

    /// Total number of counted lines across all languages.
    #[must_use]
    pub fn total_lines(&self) -> usize {
        self.files.by_type.values().map(|s| s.lines).sum()
    }
}

/// A rendered project tree together with its statistics.
///
/// The tree text and the statistics are independent results: building a
/// report never prints anything, [`TreeReport::print`] does.
#[derive(Clone, Debug)]
pub struct TreeReport {
    lines: Vec<String>,
    stats: TreeStats,
}

impl TreeReport {
    /// Walk `root` and build its report.
    ///
    /// This never fails: directories that cannot be listed contribute
    /// nothing and files that cannot be read count as zero lines.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use std::path::Path;
    /// # use icp_mgr::{config::Style, tree::TreeReport};
    /// let report = TreeReport::generate(Path::new("."), Style::plain());
    /// println!("{}", report.text());
    /// ```
    #[must_use]
    pub fn generate(root: &Path, style: Style) -> Self {
        let mut walker = TreeWalker::new(style);
        walker.walk_root(root);

        let (lines, stats) = walker.finish();
        debug!(
            "Counted {} lines in {} files under {} folders",
            stats.total_lines(),
            stats.files.total,
            stats.folders
        );

        Self { lines, stats }
    }

    /// Display lines, root label first.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[must_use]
    pub const fn stats(&self) -> &TreeStats {
        &self.stats
    }

    /// The tree as a single multi-line block.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// The statistics as a pretty-printed JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn stats_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.stats)?)
    }

    /// Print the statistics followed by the tree to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the statistics cannot be serialized.
    pub fn print(&self) -> Result<()> {
        println!("{}", self.stats_json()?);
        println!("{}", self.text());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_file_accumulates_per_language() {
        let mut stats = TreeStats::default();
        stats.record_file(Some(("Rust", 10)));
        stats.record_file(Some(("Rust", 5)));
        stats.record_file(Some(("Python", 3)));
        stats.record_file(None);

        assert_eq!(stats.files.total, 4);
        assert_eq!(
            stats.language("Rust"),
            Some(LanguageStats { files: 2, lines: 15 })
        );
        assert_eq!(
            stats.language("Python"),
            Some(LanguageStats { files: 1, lines: 3 })
        );
        assert_eq!(stats.language("Go"), None);
        assert_eq!(stats.total_lines(), 18);
    }

    #[test]
    fn test_stats_json_shape_is_key_ordered() {
        let mut stats = TreeStats {
            folders: 2,
            ..TreeStats::default()
        };
        stats.record_file(Some(("TypeScript", 7)));
        stats.record_file(Some(("JSON", 1)));

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["folders"], 2);
        assert_eq!(json["files"]["total"], 2);
        assert_eq!(json["files"]["by_type"]["TypeScript"]["lines"], 7);
        assert_eq!(json["files"]["by_type"]["JSON"]["files"], 1);

        let text = serde_json::to_string(&stats).unwrap();
        let json_pos = text.find("\"JSON\"").unwrap();
        let ts_pos = text.find("\"TypeScript\"").unwrap();
        assert!(json_pos < ts_pos);
        assert!(text.find("\"folders\"").unwrap() < text.find("\"files\"").unwrap());
    }
}
