//! Subscriber construction.

use super::exporter;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when neither `RUST_LOG` nor `trace_level` is set.
const DEFAULT_FILTER: &str = "warn";

/// Installs the global tracing subscriber.
///
/// Human-readable events go to stderr through the fmt layer. When
/// `config.trace_file` is set, every finished span is also appended to that file
/// as one JSON line. If the file's directory cannot be created the span file is
/// skipped and a warning is logged; tracing never prevents a command from running.
///
/// Only the first call in a process takes effect.
///
/// # Example
///
/// ```rust
/// use shelfmark::observability::init_tracing;
/// use shelfmark::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
///
/// tracing::debug!("tracing is active");
/// ```
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.trace_level.as_deref().unwrap_or(DEFAULT_FILTER))
    });

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let mut span_file_error = None;
    let otel_layer = config.trace_file_path().and_then(|path| {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = std::fs::create_dir_all(parent) {
                span_file_error = Some(format!("{}: {e}", parent.display()));
                return None;
            }
        }

        let resource = Resource::new(vec![opentelemetry::KeyValue::new(
            "service.name",
            env!("CARGO_PKG_NAME"),
        )]);
        let provider = exporter::create_tracer_provider(path, resource);
        Some(OpenTelemetryLayer::new(provider.tracer(env!("CARGO_PKG_NAME"))))
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init();

    if let Some(error) = span_file_error {
        tracing::warn!(%error, "span file disabled, cannot create its directory");
    }
}
