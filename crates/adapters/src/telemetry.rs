//! Tracing subscriber setup for binaries embedding the connector.

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// The filter honors `RUST_LOG`, defaulting to `info`. Installation is
/// best-effort: if a subscriber is already set (as in test binaries), the
/// existing one stays.
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().try_init().ok();
    } else {
        builder.try_init().ok();
    }
}
