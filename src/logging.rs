//! Tracing subscriber initialisation for the action binary.
//!
//! Logs go to stderr so that stdout stays free for step outputs when no
//! output file is configured. `RUST_LOG` overrides the default `info` level.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global subscriber; later calls are ignored.
///
/// `json` switches to newline-delimited JSON log lines.
pub fn init(json: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Level::INFO.as_str()));

    let registry = tracing_subscriber::registry().with(env_filter);
    let _ignored = if json {
        registry
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false).json())
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init()
    };
}
