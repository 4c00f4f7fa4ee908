use crate::config::Config;
use opentelemetry::{global, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{runtime, trace as sdktrace, Resource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Registry};

pub struct ObservabilityGuard;

impl Drop for ObservabilityGuard {
    fn drop(&mut self) {
        shutdown();
    }
}

pub fn init(config: &Config) -> Result<ObservabilityGuard, Box<dyn std::error::Error>> {
    init_tracing(config)?;
    init_metrics(config)?;
    Ok(ObservabilityGuard)
}

fn init_tracing(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "boardnotify=debug,tower_http=debug".into());

    // Spans go to the OTLP collector only when an endpoint is configured
    let otel_layer = match &config.otel_exporter_endpoint {
        Some(endpoint) => Some(
            tracing_opentelemetry::layer().with_tracer(otlp_tracer(endpoint, &config.service_name)?),
        ),
        None => None,
    };

    Registry::default()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .with(otel_layer)
        .init();

    Ok(())
}

fn otlp_tracer(
    endpoint: &str,
    service_name: &str,
) -> Result<sdktrace::Tracer, opentelemetry::trace::TraceError> {
    let exporter = opentelemetry_otlp::new_exporter()
        .tonic()
        .with_endpoint(endpoint);

    opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(exporter)
        .with_trace_config(sdktrace::config().with_resource(Resource::new(vec![
            KeyValue::new("service.name", service_name.to_string()),
        ])))
        .install_batch(runtime::Tokio)
}

/// Exposes the notification counters on `/metrics`.
fn init_metrics(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], config.metrics_port))
        .install()?;

    metrics::describe_counter!(
        "notifications_created_total",
        "Notifications persisted"
    );
    metrics::describe_counter!(
        "notifications_suppressed_total",
        "Event notifications skipped because the actor is the recipient"
    );
    metrics::describe_counter!(
        "notifications_mark_all_failures_total",
        "Individual read-flag updates that failed during mark-all-as-read"
    );

    tracing::info!(
        "Metrics exporter (Prometheus) started on port {}",
        config.metrics_port
    );
    Ok(())
}

pub fn shutdown() {
    global::shutdown_tracer_provider();
}
