//! Terminal styling configuration.
//!
//! All colored output goes through a [`Style`] value that is decided once at
//! startup. With color disabled every helper returns the text untouched, so
//! reports produced for non-terminal consumers contain no escape codes.

use std::io::IsTerminal;

use colored::Colorize;

/// Immutable styling decision for console output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Style {
    color: bool,
}

impl Style {
    /// Style that never emits escape codes.
    #[must_use]
    pub const fn plain() -> Self {
        Self { color: false }
    }

    /// Style that always emits escape codes (subject to `colored`'s own
    /// `NO_COLOR` / `CLICOLOR_FORCE` handling).
    #[must_use]
    pub const fn colored() -> Self {
        Self { color: true }
    }

    /// Pick a style for stdout.
    ///
    /// Color is used only when it isn't explicitly disabled, `NO_COLOR` is
    /// unset and stdout is a terminal.
    #[must_use]
    pub fn detect(no_color: bool) -> Self {
        let color = !no_color
            && std::env::var_os("NO_COLOR").is_none()
            && std::io::stdout().is_terminal();

        Self { color }
    }

    #[must_use]
    pub const fn is_colored(self) -> bool {
        self.color
    }

    /// Project root label in the tree.
    #[must_use]
    pub fn root(self, name: &str) -> String {
        self.paint(name, |s| s.blue().to_string())
    }

    /// Directory names in the tree.
    #[must_use]
    pub fn folder(self, name: &str) -> String {
        self.paint(name, |s| s.blue().bold().to_string())
    }

    /// Line counts in the tree.
    #[must_use]
    pub fn count(self, lines: usize) -> String {
        self.paint(&lines.to_string(), |s| s.green().to_string())
    }

    /// Announcement of an operation that is starting.
    #[must_use]
    pub fn info(self, msg: &str) -> String {
        self.paint(msg, |s| s.cyan().to_string())
    }

    #[must_use]
    pub fn success(self, msg: &str) -> String {
        self.paint(msg, |s| s.green().to_string())
    }

    #[must_use]
    pub fn warning(self, msg: &str) -> String {
        self.paint(msg, |s| s.yellow().to_string())
    }

    #[must_use]
    pub fn error(self, msg: &str) -> String {
        self.paint(msg, |s| s.red().to_string())
    }

    /// Banner of a multi-step operation.
    #[must_use]
    pub fn banner(self, msg: &str) -> String {
        self.paint(msg, |s| s.cyan().bold().to_string())
    }

    /// Closing banner of a successful multi-step operation.
    #[must_use]
    pub fn banner_success(self, msg: &str) -> String {
        self.paint(msg, |s| s.green().bold().to_string())
    }

    fn paint(self, text: &str, styled: impl FnOnce(&str) -> String) -> String {
        if self.color {
            styled(text)
        } else {
            text.to_string()
        }
    }
}
