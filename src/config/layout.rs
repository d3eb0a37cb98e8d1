//! Project layout configuration.
//!
//! Describes where the project root and its frontend package live on disk.

use std::path::{Path, PathBuf};

/// Default name of the frontend package directory, relative to the root.
pub const DEFAULT_FRONTEND_DIR: &str = "frontend";

/// Location of the project on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectLayout {
    /// Project root: where `dfx.json` lives and where `dfx` is run
    pub root: PathBuf,

    /// Frontend package directory, relative to `root`
    pub frontend_dir: PathBuf,
}

impl ProjectLayout {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            frontend_dir: PathBuf::from(DEFAULT_FRONTEND_DIR),
        }
    }

    #[must_use]
    pub fn with_frontend_dir(mut self, frontend_dir: impl Into<PathBuf>) -> Self {
        self.frontend_dir = frontend_dir.into();
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute (or root-relative) path of the frontend package.
    ///
    /// An absolute `frontend_dir` is returned as is.
    #[must_use]
    pub fn frontend_path(&self) -> PathBuf {
        self.root.join(&self.frontend_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_frontend_dir() {
        let layout = ProjectLayout::new("/work/app");

        assert_eq!(layout.root(), Path::new("/work/app"));
        assert_eq!(layout.frontend_path(), PathBuf::from("/work/app/frontend"));
    }

    #[test]
    fn test_custom_frontend_dir() {
        let layout = ProjectLayout::new("/work/app").with_frontend_dir("web/ui");

        assert_eq!(layout.frontend_path(), PathBuf::from("/work/app/web/ui"));
    }

    #[cfg(unix)]
    #[test]
    fn test_absolute_frontend_dir_overrides_root() {
        let layout = ProjectLayout::new("/work/app").with_frontend_dir("/elsewhere/ui");

        assert_eq!(layout.frontend_path(), PathBuf::from("/elsewhere/ui"));
    }
}
