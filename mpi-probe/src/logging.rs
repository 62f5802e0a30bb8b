use std::io;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, registry, EnvFilter, Layer};

const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber. Diagnostics go to stderr so stdout only
/// carries the greeting; `RUST_LOG` overrides the default `warn` filter.
///
/// Returns false if a global subscriber was already set.
pub fn init_logging() -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let console_layer = fmt::Layer::new()
        .with_writer(io::stderr)
        .with_target(false)
        .with_filter(filter);

    registry().with(console_layer).try_init().is_ok()
}
