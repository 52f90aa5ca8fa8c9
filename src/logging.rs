//! Default tracing setup for hosts embedding the crate.

use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a pretty-printed `tracing` subscriber at the INFO level.
///
/// Hosts that already install their own subscriber should skip this; the
/// crate only ever emits through the `tracing` facade.
///
/// # Panics
/// Panics if a global subscriber is already set.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .pretty()
                .with_filter(filter::LevelFilter::INFO),
        )
        .init();
}
