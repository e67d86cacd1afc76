use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use opentelemetry::{KeyValue, global, trace::TraceError};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{Resource, propagation::TraceContextPropagator, runtime, trace::Tracer};
use opentelemetry_semantic_conventions::resource::{SERVICE_NAME, SERVICE_VERSION};
use tracing::{Instrument, error, field::Empty, info, info_span};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

const DEFAULT_LOG_DIR: &str = "storage/logs";
const DEFAULT_FILTER: &str = "identity_service=info,identity_auth=info,tower_http=warn";

/// Wraps each request in a `request` span and logs its outcome once.
///
/// Rejected requests are already logged by `AppError`, so only server
/// errors are raised above info here.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| req.uri().path().to_owned(), |p| p.as_str().to_owned());

    let span = info_span!(
        "request",
        request_id = %Uuid::new_v4(),
        method = %req.method(),
        route = %route,
        status = Empty,
        latency_ms = Empty,
    );

    let response = next.run(req).instrument(span.clone()).await;
    let status = response.status();
    span.record("status", status.as_u16());
    span.record("latency_ms", started.elapsed().as_millis() as u64);

    span.in_scope(|| {
        if status.is_server_error() {
            error!("Request failed");
        } else {
            info!("Request completed");
        }
    });

    response
}

fn otlp_tracer(endpoint: String, environment: &str) -> Result<Tracer, TraceError> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(
            opentelemetry_otlp::new_exporter()
                .tonic()
                .with_endpoint(endpoint),
        )
        .with_trace_config(opentelemetry_sdk::trace::Config::default().with_resource(Resource::new([
            KeyValue::new(SERVICE_NAME, env!("CARGO_PKG_NAME")),
            KeyValue::new(SERVICE_VERSION, env!("CARGO_PKG_VERSION")),
            KeyValue::new("deployment.environment", environment.to_owned()),
        ])))
        .install_batch(runtime::Tokio)
}

/// Installs the global subscriber.
///
/// Console output honours `RUST_LOG`, then `LOG_LEVEL`. A daily JSON file
/// under `LOG_DIR` keeps info and above. Spans are exported over OTLP only
/// when `OTEL_EXPORTER_OTLP_ENDPOINT` is set.
pub fn init_tracing(environment: &str) -> anyhow::Result<()> {
    let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| DEFAULT_LOG_DIR.to_owned());
    std::fs::create_dir_all(&log_dir)?;

    let console_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env("LOG_LEVEL"))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let console_layer = fmt::layer()
        .compact()
        .with_target(false)
        .with_filter(console_filter);

    let json_layer = fmt::layer()
        .json()
        .with_writer(RollingFileAppender::new(
            Rotation::DAILY,
            &log_dir,
            "identity-service.json",
        ))
        .with_current_span(true)
        .with_filter(EnvFilter::new(DEFAULT_FILTER));

    let mut otel_error = None;
    let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
        .ok()
        .filter(|endpoint| !endpoint.is_empty())
        .and_then(|endpoint| match otlp_tracer(endpoint, environment) {
            Ok(tracer) => Some(tracing_opentelemetry::layer().with_tracer(tracer)),
            Err(e) => {
                otel_error = Some(e);
                None
            }
        });
    let otel_enabled = otel_layer.is_some();

    tracing_subscriber::registry()
        .with(console_layer)
        .with(json_layer)
        .with(otel_layer)
        .try_init()?;

    if let Some(e) = otel_error {
        tracing::warn!(error = %e, "OTLP export disabled");
    }
    info!(log_dir = %log_dir, otel_enabled, "Tracing initialized");
    Ok(())
}

pub fn shutdown_tracer() {
    global::shutdown_tracer_provider();
}
