//! Recursive directory walk that renders the tree.

use std::{
    cmp::Ordering,
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use super::{lines::count_lines, report::TreeStats};
use crate::{
    config::Style,
    exclusions::{is_tree_excluded, language_for},
};

const TEE: &str = "├── ";
const ELBOW: &str = "└── ";
const PIPE: &str = "│   ";
const SPACER: &str = "    ";

struct Entry {
    name: String,
    path: PathBuf,
    is_dir: bool,
}

pub(super) struct TreeWalker {
    style: Style,
    lines: Vec<String>,
    stats: TreeStats,
    /// Canonical paths of the directories currently being walked.
    ancestors: HashSet<PathBuf>,
}

impl TreeWalker {
    pub(super) fn new(style: Style) -> Self {
        Self {
            style,
            lines: Vec::new(),
            stats: TreeStats::default(),
            ancestors: HashSet::new(),
        }
    }

    pub(super) fn walk_root(&mut self, root: &Path) {
        let canonical = root.canonicalize().ok();
        let label = canonical
            .as_deref()
            .and_then(Path::file_name)
            .or_else(|| root.file_name())
            .map_or_else(
                || root.display().to_string(),
                |n| n.to_string_lossy().into_owned(),
            );

        self.lines.push(format!("{}/", self.style.root(&label)));

        if let Some(canonical) = canonical {
            self.ancestors.insert(canonical);
        }

        self.walk_dir(root, &mut String::new());
    }

    pub(super) fn finish(self) -> (Vec<String>, TreeStats) {
        (self.lines, self.stats)
    }

    fn walk_dir(&mut self, dir: &Path, prefix: &mut String) {
        let entries = read_sorted_entries(dir);
        let count = entries.len();

        for (index, entry) in entries.into_iter().enumerate() {
            let is_last = index + 1 == count;
            let connector = if is_last { ELBOW } else { TEE };

            if entry.is_dir {
                self.stats.folders += 1;
                self.lines.push(format!(
                    "{prefix}{connector}{}/",
                    self.style.folder(&entry.name)
                ));

                let canonical = canonical_dir(&entry.path);
                if canonical.as_ref().is_some_and(|c| self.ancestors.contains(c)) {
                    warn!("Not descending into {}: symlink loop", entry.path.display());
                    continue;
                }

                if let Some(canonical) = &canonical {
                    self.ancestors.insert(canonical.clone());
                }

                let extension = if is_last { SPACER } else { PIPE };
                prefix.push_str(extension);
                self.walk_dir(&entry.path, prefix);
                prefix.truncate(prefix.len() - extension.len());

                if let Some(canonical) = &canonical {
                    self.ancestors.remove(canonical);
                }
            } else {
                let language = language_for(&entry.path);
                let lines = language.map(|label| (label, count_lines(&entry.path)));
                self.stats.record_file(lines);

                match lines {
                    Some((_, n)) => self.lines.push(format!(
                        "{prefix}{connector}{} :: {} lines",
                        entry.name,
                        self.style.count(n)
                    )),
                    None => self.lines.push(format!("{prefix}{connector}{}", entry.name)),
                }
            }
        }
    }
}

fn canonical_dir(dir: &Path) -> Option<PathBuf> {
    dir.canonicalize()
        .map_err(|e| debug!("Could not canonicalize {}: {e}", dir.display()))
        .ok()
}

/// List a directory, dropping excluded names, directories first and then
/// files, each group sorted case-insensitively.
///
/// A directory that cannot be listed yields no entries.
fn read_sorted_entries(dir: &Path) -> Vec<Entry> {
    let read_dir = match fs::read_dir(dir) {
        Ok(read_dir) => read_dir,
        Err(e) => {
            debug!("Could not list {}: {e}", dir.display());
            return Vec::new();
        }
    };

    let mut entries: Vec<Entry> = read_dir
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("Could not read an entry of {}: {e}", dir.display());
                None
            }
        })
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            if is_tree_excluded(&name) {
                return None;
            }

            let path = entry.path();
            // Follow symlinks so a linked directory is shown as a directory.
            let is_dir = fs::metadata(&path).is_ok_and(|m| m.is_dir());

            Some(Entry { name, path, is_dir })
        })
        .collect();

    entries.sort_by(compare_entries);
    entries
}

fn compare_entries(a: &Entry, b: &Entry) -> Ordering {
    b.is_dir
        .cmp(&a.is_dir)
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
}
