//! Tracing initialisation for binaries and test harnesses built on the
//! resolution core.
//!
//! The library itself only emits through the `tracing` facade; where those
//! events go is the caller's choice.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialise the global tracing subscriber.
///
/// `level` is the default verbosity when `RUST_LOG` is not set; `RUST_LOG`
/// takes precedence for fine-grained filtering.
///
/// Safe to call more than once; only the first call takes effect.
pub fn init_tracing(level: Level) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false))
        .try_init()
        .ok();
}
