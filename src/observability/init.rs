//! Subscriber setup: `tracing` macros → OpenTelemetry → OTLP JSON file.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::tracer;
use crate::Config;

/// Trace file name inside the data directory.
pub const TRACE_FILE: &str = "cinesearch-otlp.json";

const SERVICE_NAME: &str = "cinesearch";

/// Installs the global subscriber.
///
/// The filter comes from `RUST_LOG` when set, otherwise from
/// `config.trace_level`, otherwise `info`. Calling this more than once is
/// harmless; only the first call installs anything. If the data directory
/// cannot be created, tracing stays off.
pub fn init_tracing(config: &Config) {
    if let Err(e) = std::fs::create_dir_all(&config.data_dir) {
        eprintln!(
            "cinesearch: tracing disabled, cannot create {}: {e}",
            config.data_dir.display()
        );
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.trace_level.as_deref().unwrap_or("info"))
    });

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let provider =
        tracer::create_tracer_provider(config.data_dir.join(TRACE_FILE), resource, SERVICE_NAME);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
}
