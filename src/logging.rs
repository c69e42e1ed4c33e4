//! Logger setup for binaries and training drivers.
//!
//! The library only emits records through the `log` facade; whoever owns
//! `main` decides whether to install a backend.

use log::LevelFilter;

/// Install an env_logger backend at `info`, overridable through `RUST_LOG`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    init_logging_with_level(LevelFilter::Info);
}

pub fn init_logging_with_level(level: LevelFilter) {
    let _ = env_logger::builder()
        .format_target(false)
        .format_timestamp_secs()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}
