//! Tracing initialization and subscriber setup.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service and scope name stamped on every exported span.
const SERVICE_NAME: &str = "mailfeed";

/// Trace file name inside the data directory.
const TRACE_FILE: &str = "mailfeed-otlp.json";

/// Level used when neither `RUST_LOG` nor `trace_level` is set.
const DEFAULT_LEVEL: &str = "info";

/// Installs the global tracing subscriber.
///
/// Spans and events pass an [`EnvFilter`] and are exported through
/// OpenTelemetry to `<data_dir>/mailfeed-otlp.json` (see
/// [`get_data_dir`](crate::infrastructure::get_data_dir)). Nothing is written to
/// the terminal.
///
/// The filter comes from `RUST_LOG` when set, otherwise from
/// `config.trace_level`, otherwise `info`.
///
/// Tracing is best effort: if the data directory cannot be created, or a
/// subscriber is already installed, this returns without doing anything.
///
/// # Example
///
/// ```rust
/// use mailfeed::observability::init_tracing;
/// use mailfeed::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let data_dir = crate::infrastructure::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL))
    });

    let resource = Resource::new(vec![
        opentelemetry::KeyValue::new("service.name", SERVICE_NAME),
        opentelemetry::KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let provider =
        tracer::create_tracer_provider(data_dir.join(TRACE_FILE), resource, SERVICE_NAME);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
}
