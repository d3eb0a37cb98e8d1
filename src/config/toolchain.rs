//! External tool configuration.
//!
//! Names the programs used to build the frontend and to manage the local
//! replica. Both can be overridden, e.g. to point at a pinned `dfx` binary.

/// Programs invoked by the orchestrator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toolchain {
    /// Frontend package manager (`npm`, or `npm.cmd` on Windows)
    pub npm: String,

    /// Internet Computer SDK CLI
    pub dfx: String,
}

impl Toolchain {
    /// Default npm program for the current platform.
    ///
    /// On Windows `npm` is a batch shim, which `std::process::Command` only
    /// resolves when the `.cmd` suffix is spelled out.
    #[must_use]
    pub const fn default_npm() -> &'static str {
        if cfg!(windows) { "npm.cmd" } else { "npm" }
    }

    #[must_use]
    pub const fn default_dfx() -> &'static str {
        "dfx"
    }

    /// Build a toolchain, falling back to the platform defaults for any
    /// program that isn't overridden.
    #[must_use]
    pub fn with_overrides(npm: Option<String>, dfx: Option<String>) -> Self {
        Self {
            npm: npm.unwrap_or_else(|| Self::default_npm().to_string()),
            dfx: dfx.unwrap_or_else(|| Self::default_dfx().to_string()),
        }
    }
}

impl Default for Toolchain {
    fn default() -> Self {
        Self::with_overrides(None, None)
    }
}
