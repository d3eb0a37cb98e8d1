//! Diagnostic logging setup.
//!
//! User-facing progress goes to stdout through [`Style`](crate::config::Style);
//! this module only wires the `tracing` diagnostics, which are written to
//! stderr and stay silent unless `-v` or `RUST_LOG` asks for them.

use tracing_subscriber::{EnvFilter, fmt};

/// Map the `-v` count to a default filter directive.
#[must_use]
pub const fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `RUST_LOG`, when set, wins over `verbose`.
/// Escape codes are emitted only when `ansi` is set.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(verbose: u8, ansi: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_for(verbose)));

    let _ = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(ansi)
        .compact()
        .try_init();
}
