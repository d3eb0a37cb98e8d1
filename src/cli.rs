//! Command-line interface definition.
//!
//! The five action flags are independent booleans; when several are given
//! the first one in [`Action`] priority order wins. The historical two-letter
//! short forms `-fb` and `-rb` are not expressible as clap short flags, so
//! [`normalize_args`] rewrites them to their long forms before parsing.

use std::{ffi::OsString, path::PathBuf};

use clap::Parser;

use crate::config::{ProjectLayout, Style, Toolchain, layout::DEFAULT_FRONTEND_DIR};

#[derive(Parser, Debug)]
#[allow(clippy::struct_excessive_bools)]
struct ActionArgs {
    /// Show the project tree with line counts
    #[arg(short = 't', long)]
    tree: bool,

    /// Clean build artifacts and dependencies
    #[arg(short = 'c', long)]
    clean: bool,

    /// Build the frontend only (short form: -fb)
    #[arg(long)]
    frontend: bool,

    /// Restart the local replica and deploy the canisters
    #[arg(short = 'r', long)]
    replica: bool,

    /// Full rebuild: replica, backend, then frontend (short form: -rb)
    #[arg(long)]
    rebuild: bool,
}

#[derive(Parser, Debug)]
struct ProjectArgs {
    /// Project root directory
    #[arg(long, env = "ICP_MGR_ROOT", default_value = ".")]
    root: PathBuf,

    /// Frontend package directory, relative to the root
    #[arg(long, env = "ICP_MGR_FRONTEND_DIR", default_value = DEFAULT_FRONTEND_DIR)]
    frontend_dir: PathBuf,

    /// Program used to build the frontend [default: npm]
    #[arg(long, env = "ICP_MGR_NPM")]
    npm: Option<String>,

    /// Internet Computer SDK program [default: dfx]
    #[arg(long, env = "ICP_MGR_DFX")]
    dfx: Option<String>,
}

#[derive(Parser, Debug)]
struct OutputArgs {
    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Increase diagnostic output (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Parser, Debug)]
#[command(name = "icp-mgr", version)]
#[command(about = "ICP Svelte project manager")]
pub struct Cli {
    /// Actions
    #[command(flatten)]
    actions: ActionArgs,

    /// Project options
    #[command(flatten)]
    project: ProjectArgs,

    /// Output options
    #[command(flatten)]
    output: OutputArgs,
}

/// The single operation selected for this invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Tree,
    Clean,
    Frontend,
    Replica,
    Rebuild,
}

/// Rewrite legacy two-letter short flags to their long equivalents.
///
/// Only whole arguments are rewritten; everything after a `--` separator is
/// passed through untouched.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut after_separator = false;

    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if after_separator {
                return arg;
            }
            match arg.to_str() {
                Some("--") => {
                    after_separator = true;
                    arg
                }
                Some("-fb") => OsString::from("--frontend"),
                Some("-rb") => OsString::from("--rebuild"),
                _ => arg,
            }
        })
        .collect()
}

impl Cli {
    /// Parse the process arguments, accepting the legacy short flags.
    #[must_use]
    pub fn parse_normalized() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    /// The selected action, or `None` when no action flag was given.
    #[must_use]
    pub const fn action(&self) -> Option<Action> {
        let a = &self.actions;

        if a.tree {
            Some(Action::Tree)
        } else if a.clean {
            Some(Action::Clean)
        } else if a.frontend {
            Some(Action::Frontend)
        } else if a.replica {
            Some(Action::Replica)
        } else if a.rebuild {
            Some(Action::Rebuild)
        } else {
            None
        }
    }

    #[must_use]
    pub fn layout(&self) -> ProjectLayout {
        ProjectLayout::new(self.project.root.clone())
            .with_frontend_dir(self.project.frontend_dir.clone())
    }

    #[must_use]
    pub fn toolchain(&self) -> Toolchain {
        Toolchain::with_overrides(self.project.npm.clone(), self.project.dfx.clone())
    }

    #[must_use]
    pub fn style(&self) -> Style {
        Style::detect(self.output.no_color)
    }

    #[must_use]
    pub const fn verbose(&self) -> u8 {
        self.output.verbose
    }
}
