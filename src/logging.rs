//! Opt-in logging setup for host binaries.
//!
//! The library itself only emits `tracing` events; hosts that already run
//! a subscriber can ignore this module.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::FoldConfig;

/// Install a global subscriber writing to `mailfold.log` in the config
/// directory, falling back to stderr when the file cannot be created.
/// Call once at startup.
pub fn setup_logging() {
    use std::fs::OpenOptions;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,mailfold=debug"));

    let log_file = FoldConfig::config_dir()
        .ok()
        .map(|dir| dir.join("mailfold.log"))
        .and_then(|path| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .ok()
        });

    if let Some(file) = log_file {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::sync::Mutex::new(file))
                    .with_ansi(false),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
