//! Console logging shared by the binaries

use env_logger::{Builder, Env};
use std::io::Write;

/// Initialise `env_logger`. `RUST_LOG` overrides the default level, which is
/// `info`, or `debug` when `verbose` is set.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };

    Builder::from_env(Env::default().default_filter_or(default_level))
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}
