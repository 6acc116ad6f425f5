//! Tracing subscriber setup with optional OTLP trace export.

use std::time::Duration;

use opentelemetry::KeyValue;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::AppError;

const SERVICE_NAME: &str = "facetfetch-api";
const EXPORT_TIMEOUT: Duration = Duration::from_secs(10);

/// Installs the global JSON tracing subscriber, filtered by `RUST_LOG`
/// (default `info`). When `otlp_endpoint` is set, spans are also exported
/// over OTLP gRPC and the returned provider must be passed to [`shutdown`].
///
/// # Errors
///
/// Returns `AppError::Telemetry` if the exporter cannot be built or a
/// global subscriber is already installed.
pub fn init(otlp_endpoint: Option<&str>) -> Result<Option<SdkTracerProvider>, AppError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json();

    let Some(endpoint) = otlp_endpoint else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| AppError::Telemetry(e.to_string()))?;
        return Ok(None);
    };

    let exporter = SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .with_timeout(EXPORT_TIMEOUT)
        .build()
        .map_err(|e| AppError::Telemetry(format!("failed to build OTLP span exporter: {e}")))?;

    let resource = Resource::builder_empty()
        .with_attributes([
            KeyValue::new("service.name", SERVICE_NAME),
            KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
        ])
        .build();
    let provider = SdkTracerProvider::builder()
        .with_resource(resource)
        .with_batch_exporter(exporter)
        .build();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(tracing_opentelemetry::layer().with_tracer(provider.tracer(SERVICE_NAME)))
        .try_init()
        .map_err(|e| AppError::Telemetry(e.to_string()))?;
    opentelemetry::global::set_tracer_provider(provider.clone());

    tracing::info!(endpoint, "OTLP trace export enabled");
    Ok(Some(provider))
}

/// Flushes pending spans and stops the exporter. Errors are logged.
pub fn shutdown(provider: Option<SdkTracerProvider>) {
    let Some(provider) = provider else {
        return;
    };
    if let Err(e) = provider.force_flush() {
        tracing::warn!(error = %e, "failed to flush spans during shutdown");
    }
    if let Err(e) = provider.shutdown() {
        tracing::warn!(error = %e, "failed to shut down tracer provider");
    }
}
