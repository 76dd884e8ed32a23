//! Tracing setup for embedding applications

use std::sync::Once;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing subscriber (only once)
///
/// Honors `RUST_LOG`, defaulting to `drawspace_core=info`. Applications that
/// install their own subscriber should not call this.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::new(
                std::env::var("RUST_LOG").unwrap_or_else(|_| "drawspace_core=info".into()),
            ))
            .with(tracing_subscriber::fmt::layer())
            .try_init();
    });
}
