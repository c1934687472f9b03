//! Subscriber setup for hosts that want tracker output on the console.

use std::sync::Once;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration.
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    /// Filter directives in `tracing-subscriber` syntax, e.g. `"info"` or
    /// `"marktime=trace"`. `None` or an unparsable value falls back to
    /// `RUST_LOG`, then `info`.
    pub env_filter: Option<String>,
    /// Whether the `fmt` layer writes ANSI escape codes
    pub ansi: bool,
}

static INIT: Once = Once::new();

/// Install a global `fmt` subscriber once; later calls are ignored.
///
/// The filter comes from `config.env_filter`, then `RUST_LOG`, then `info`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = config
            .env_filter
            .as_deref()
            .and_then(|f| EnvFilter::try_new(f).ok())
            .or_else(|| EnvFilter::try_from_default_env().ok())
            .unwrap_or_else(|| EnvFilter::new("info"));

        let installed = tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_ansi(config.ansi))
            .with(filter)
            .try_init();

        if installed.is_ok() {
            tracing::debug!(target: "marktime", "logging initialized");
        }
    });
}
