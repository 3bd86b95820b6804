//! Tracing subscriber setup.
//!
//! Filter comes from `HARAMBEE_LOG` (EnvFilter syntax), defaulting to `info`.
//! `HARAMBEE_LOG_JSON=1` switches to JSON lines.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_ENV: &str = "HARAMBEE_LOG";
pub const LOG_JSON_ENV: &str = "HARAMBEE_LOG_JSON";

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
        .unwrap_or(false)
}

/// Install the global subscriber. Returns false if one was already installed.
pub fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    if env_flag(LOG_JSON_ENV) {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()
            .is_ok()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .try_init()
            .is_ok()
    }
}
