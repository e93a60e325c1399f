//! Log subscriber.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{
    EnvFilter, Registry,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{ServerConfig, observability::LogFormat};

use super::ObservabilityError;

/// Noisy transport crates are capped at `warn` unless `RUST_LOG` says otherwise.
const QUIET_DEPENDENCIES: &str =
    "h2=warn,hyper=warn,tonic=warn,sqlx=warn,reqwest=warn,opentelemetry=warn";

pub(super) fn init_subscriber(
    config: &ServerConfig,
    tracer_provider: Option<&SdkTracerProvider>,
) -> Result<(), ObservabilityError> {
    match config.logging.log_format {
        LogFormat::Compact => install(
            config,
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(true)
                .with_line_number(true),
            tracer_provider,
        ),
        LogFormat::Json => install(
            config,
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(false)
                .with_target(true),
            tracer_provider,
        ),
    }
}

fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{log_level},{QUIET_DEPENDENCIES}")))
}

fn install<L>(
    config: &ServerConfig,
    fmt_layer: L,
    tracer_provider: Option<&SdkTracerProvider>,
) -> Result<(), ObservabilityError>
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    let subscriber = tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter(&config.logging.log_level));

    match tracer_provider {
        Some(provider) => {
            let tracer = provider.tracer(config.observability.otel_service_name.clone());

            subscriber
                .with(tracing_opentelemetry::layer().with_tracer(tracer))
                .try_init()?;
        }
        None => subscriber.try_init()?,
    }

    Ok(())
}

