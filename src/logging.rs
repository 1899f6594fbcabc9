//! Logger setup for the `horde` binary.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger.
///
/// `RUST_LOG` wins when set. Otherwise `verbose` prints per-generation debug
/// messages and the default shows warnings only, keeping stdout reports
/// clean of chatter on stderr.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);
    builder.format_timestamp(None);

    // Only fails if a logger is already installed
    let _ = builder.try_init();
}
