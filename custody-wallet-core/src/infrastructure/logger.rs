//! Logging setup

use env_logger::{Builder, Env};

/// Install the global `env_logger`, honouring `RUST_LOG` and falling back to
/// `default_level`.
///
/// Returns `false` if a logger was already installed; calling it again is harmless.
pub fn init_logging(default_level: &str) -> bool {
    let installed = Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .try_init()
        .is_ok();

    if installed {
        log::debug!("Logging initialized at default level '{}'", default_level);
    }
    installed
}
