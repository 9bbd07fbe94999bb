use crate::config::Config;
use opentelemetry::{global, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{runtime, trace as sdktrace, Resource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Registry};

/// Flushes the OTLP exporter when dropped at the end of `main`.
pub struct ObservabilityGuard;

impl Drop for ObservabilityGuard {
    fn drop(&mut self) {
        global::shutdown_tracer_provider();
    }
}

pub fn init(config: &Config) -> anyhow::Result<ObservabilityGuard> {
    init_tracing(config)?;
    init_metrics(config)?;
    Ok(ObservabilityGuard)
}

fn init_tracing(config: &Config) -> anyhow::Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "postdesk=debug,tower_http=debug,sqlx=warn".into());

    match &config.otel_exporter_endpoint {
        Some(endpoint) => {
            let exporter = opentelemetry_otlp::new_exporter()
                .tonic()
                .with_endpoint(endpoint);

            let tracer = opentelemetry_otlp::new_pipeline()
                .tracing()
                .with_exporter(exporter)
                .with_trace_config(sdktrace::config().with_resource(Resource::new(vec![
                    KeyValue::new("service.name", config.service_name.clone()),
                ])))
                .install_batch(runtime::Tokio)?;

            Registry::default()
                .with(env_filter)
                .with(fmt_layer)
                .with(tracing_opentelemetry::layer().with_tracer(tracer))
                .init();
        }
        None => Registry::default().with(env_filter).with(fmt_layer).init(),
    }

    Ok(())
}

fn init_metrics(config: &Config) -> anyhow::Result<()> {
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], config.metrics_port))
        .install()?;

    tracing::info!("Prometheus exporter listening on port {}", config.metrics_port);
    Ok(())
}
