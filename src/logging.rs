//! Logger bootstrap for hosts embedding the floor detector.
//!
//! The default filter only raises this crate's own verbosity; other crates
//! stay at `warn` so a host's dependencies do not drown out floor updates.

use env_logger::{Builder, Env};
use log::{trace, LevelFilter};

/// Filter directive used when `RUST_LOG` is unset.
#[must_use]
pub fn default_filter(verbose: bool) -> String {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    format!("warn,{}={level}", env!("CARGO_CRATE_NAME"))
}

/// Installs `env_logger` as the global logger.
///
/// Verbose mode shows plane and tolerance pushes. `RUST_LOG` replaces the
/// default filter entirely. Calling this again keeps the first logger.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_filter(verbose));
    if Builder::from_env(env).try_init().is_err() {
        trace!("logger already installed; keeping it");
    }
}
