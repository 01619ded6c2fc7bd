//! sdo-connect
//!
//! Bulk account authorization for the sdo.srspu.ru learning portal. Every
//! account gets its own HTTP session (cookie jar plus fixed request headers),
//! all accounts log in concurrently, and the sessions that authorized
//! successfully are kept for further portal work.

pub mod auth;
pub mod pool;
pub mod report;

/// Initialize console logging.
///
/// Honors `RUST_LOG`, defaults to INFO.
pub fn init_logging() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();
}
