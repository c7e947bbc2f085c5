use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[cfg(feature = "verbose-logging")]
const DEFAULT_FILTER: &str = "composedeck=debug";

#[cfg(not(feature = "verbose-logging"))]
const DEFAULT_FILTER: &str = "composedeck=info";

/// Installs the global subscriber. Logs go to stderr so command output on
/// stdout stays pipeable. `RUST_LOG` overrides the default filter.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
