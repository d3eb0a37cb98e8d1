//! Static name tables shared by the tree reporter and the cleaner.
//!
//! Two related name sets control what is deleted by `--clean` and what is
//! hidden from `--tree`. The tree set re-includes `src/` (it only holds
//! generated declarations in the frontend, but is real source elsewhere)
//! and additionally hides `.git/` and the generated `declarations/` folder.

use std::path::Path;

/// Entry names removed by the cleaner wherever they appear under the root.
pub const CLEAN_EXCLUDE: &[&str] = &[
    // editors
    ".vscode",
    ".cursor",
    // python
    "__pycache__",
    "venv",
    // javascript
    ".svelte-kit",
    "dist",
    "node_modules",
    "package-lock.json",
    "build",
    // rust
    "target",
    "Cargo.lock",
    "cargo",
    // internet computer
    ".dfx",
    "backend.did",
    "src",
];

/// Entry names never listed (nor descended into) by the tree reporter.
pub const TREE_EXCLUDE: &[&str] = &[
    ".vscode",
    ".cursor",
    "__pycache__",
    "venv",
    ".svelte-kit",
    "dist",
    "node_modules",
    "package-lock.json",
    "build",
    "target",
    "Cargo.lock",
    "cargo",
    ".dfx",
    "backend.did",
    ".git",
    "declarations",
];

/// File extensions (dot included, case-sensitive) whose lines are counted.
pub const LANGUAGES: &[(&str, &str)] = &[
    (".py", "Python"),
    (".ipynb", "Jupyter Notebook"),
    (".rs", "Rust"),
    (".js", "JavaScript"),
    (".ts", "TypeScript"),
    (".c", "C"),
    (".cpp", "C++"),
    (".h", "C/C++ Header"),
    (".java", "Java"),
    (".html", "HTML"),
    (".css", "CSS"),
    (".sh", "Shell Script"),
    (".svelte", "Svelte"),
    (".toml", "TOML"),
    (".json", "JSON"),
    (".md", "Markdown"),
];

/// Whether the cleaner should remove an entry with this name.
#[must_use]
pub fn is_clean_excluded(name: &str) -> bool {
    CLEAN_EXCLUDE.contains(&name)
}

/// Whether the tree reporter should hide an entry with this name.
#[must_use]
pub fn is_tree_excluded(name: &str) -> bool {
    TREE_EXCLUDE.contains(&name)
}

/// Look up the language label for a file, based on its final extension.
///
/// Names that only start with a dot (`.bashrc`) have no extension and are
/// therefore unlabeled.
#[must_use]
pub fn language_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?;

    LANGUAGES
        .iter()
        .find(|(known, _)| known.strip_prefix('.') == Some(ext))
        .map(|(_, label)| *label)
}
