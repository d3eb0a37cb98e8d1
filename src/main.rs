//! # icp-mgr
//!
//! Developer companion for Internet Computer projects with a web frontend.
//!
//! ## Usage
//!
//! ```bash
//! # Project tree with per-language line counts
//! icp-mgr --tree
//!
//! # Remove node_modules, target, .dfx, generated declarations, ...
//! icp-mgr --clean
//!
//! # Restart the local replica, redeploy and rebuild the frontend
//! icp-mgr -rb
//! ```

use std::process::exit;

use anyhow::Result;
use clap::CommandFactory;
use icp_mgr::{
    cleaner::Cleaner,
    cli::{Action, Cli},
    logging,
    orchestrator::Orchestrator,
    process::{ProcessError, SystemRunner},
    tree::TreeReport,
};

/// Entry point for the icp-mgr application.
///
/// Errors from [`inner_main`] are printed to stderr. A failing external tool
/// makes the process exit with that tool's exit code; any other error exits
/// with `1`.
fn main() {
    if let Err(err) = inner_main() {
        eprintln!("Error: {err}");

        let code = err
            .downcast_ref::<ProcessError>()
            .map_or(1, ProcessError::exit_code);
        exit(code);
    }
}

/// Main application logic that can return errors.
///
/// 1. Parses command-line arguments (accepting `-fb` / `-rb`)
/// 2. Initializes diagnostic logging
/// 3. Runs the selected action, or prints help when none is given
///
/// # Errors
///
/// This function can return errors from:
/// - JSON serialization of the tree statistics
/// - External `npm` / `dfx` invocations
/// - Writing the help text
fn inner_main() -> Result<()> {
    let args = Cli::parse_normalized();
    let style = args.style();
    logging::init(args.verbose(), style.is_colored());

    tracing::debug!("Parsed CLI arguments: {args:?}");

    let Some(action) = args.action() else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let layout = args.layout();

    match action {
        Action::Tree => TreeReport::generate(layout.root(), style).print()?,
        Action::Clean => {
            let cleaner = Cleaner::new(style);
            let result = cleaner.clean(layout.root());
            cleaner.print_summary(&result);
        }
        Action::Frontend | Action::Replica | Action::Rebuild => {
            let mut orchestrator = Orchestrator::new(SystemRunner, layout, args.toolchain(), style);
            match action {
                Action::Frontend => orchestrator.build_frontend()?,
                Action::Replica => orchestrator.restart_and_deploy()?,
                _ => orchestrator.rebuild()?,
            }
        }
    }

    Ok(())
}
