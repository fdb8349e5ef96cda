use std::str::FromStr;

use tracing::metadata::LevelFilter;
use tracing_subscriber::{Layer, prelude::*, util::SubscriberInitExt};

/// Installs the global `tracing` subscriber.
///
/// The level comes from `LOG_LEVEL` and defaults to DEBUG in debug builds and
/// INFO otherwise. Only events from this crate are emitted.
pub fn init() {
    let default = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let level = std::env::var("LOG_LEVEL").map_or(default, |level| {
        LevelFilter::from_str(level.as_str()).unwrap_or_else(|_| {
            eprintln!("Invalid log level specified {level}, defaulting to {default}");
            default
        })
    });

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_timer(tracing_subscriber::fmt::time::ChronoUtc::rfc_3339())
                .with_filter(level)
                .with_filter(tracing_subscriber::filter::filter_fn(|metadata| {
                    metadata.target().starts_with("email_validator")
                })),
        )
        .init();
}
