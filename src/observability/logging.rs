//! Structured logging.
//!
//! # Design Decisions
//! - Uses the tracing crate for structured logging
//! - `RUST_LOG` wins when set; the config log level is the fallback
//! - Secret values never appear in log fields, only configured booleans

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber. `fallback_level` applies when
/// `RUST_LOG` is unset.
pub fn init(fallback_level: &str) {
    let directive = format!("admission_gate={fallback_level},tower_http={fallback_level}");
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| directive.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
