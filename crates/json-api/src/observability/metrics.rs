//! Prometheus metrics and the `/metrics` exposition endpoint.

use std::sync::OnceLock;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder, core::Collector,
};
use salvo::{
    Request, Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use tracing::error;

const DURATION_BUCKETS: [f64; 13] = [
    0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

#[derive(Debug)]
struct Metrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
    orders_placed_total: IntCounter,
    order_claim_conflicts_total: IntCounter,
}

static METRICS: OnceLock<Option<Metrics>> = OnceLock::new();

/// Counts a request as in flight until dropped.
#[derive(Debug)]
pub(super) struct InFlightRequestGuard {
    tracked: bool,
}

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        let Some(metrics) = metrics() else {
            return Self { tracked: false };
        };

        metrics.requests_in_flight.inc();

        Self { tracked: true }
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if self.tracked
            && let Some(metrics) = metrics()
        {
            metrics.requests_in_flight.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let status_code = status_code.to_string();

    metrics
        .requests_total
        .with_label_values(&[method, route, status_code.as_str()])
        .inc();

    metrics
        .request_duration_seconds
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

pub(crate) fn record_order_placed() {
    if let Some(metrics) = metrics() {
        metrics.orders_placed_total.inc();
    }
}

/// An order lost one of its items to a concurrent order.
pub(crate) fn record_order_claim_conflict() {
    if let Some(metrics) = metrics() {
        metrics.order_claim_conflicts_total.inc();
    }
}

#[handler]
pub(crate) async fn metrics_handler(_req: &mut Request, res: &mut Response) {
    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        return;
    };

    let encoder = TextEncoder::new();
    let mut encoded = Vec::new();

    if let Err(source) = encoder.encode(&metrics.registry.gather(), &mut encoded) {
        error!("failed to encode metrics response: {source}");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    }

    match HeaderValue::from_str(encoder.format_type()) {
        Ok(content_type) => {
            res.headers_mut().insert(CONTENT_TYPE, content_type);
            res.render(String::from_utf8_lossy(&encoded).into_owned());
        }
        Err(source) => {
            error!("failed to encode metrics content type header: {source}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}

fn metrics() -> Option<&'static Metrics> {
    METRICS.get_or_init(build_metrics).as_ref()
}

fn register<M>(registry: &Registry, metric: Result<M, prometheus::Error>) -> Option<M>
where
    M: Collector + Clone + 'static,
{
    let metric = metric
        .inspect_err(|source| error!("failed to create metric: {source}"))
        .ok()?;

    registry
        .register(Box::new(metric.clone()))
        .inspect_err(|source| error!("failed to register metric: {source}"))
        .ok()?;

    Some(metric)
}

fn build_metrics() -> Option<Metrics> {
    let registry = Registry::new();

    let requests_total = register(
        &registry,
        IntCounterVec::new(
            Opts::new(
                "rugs_json_http_requests_total",
                "HTTP requests by method, route and status code.",
            ),
            &["method", "route", "status_code"],
        ),
    )?;

    let request_duration_seconds = register(
        &registry,
        HistogramVec::new(
            HistogramOpts::new(
                "rugs_json_http_request_duration_seconds",
                "HTTP request duration in seconds by method and route.",
            )
            .buckets(DURATION_BUCKETS.to_vec()),
            &["method", "route"],
        ),
    )?;

    let requests_in_flight = register(
        &registry,
        IntGauge::with_opts(Opts::new(
            "rugs_json_http_requests_in_flight",
            "HTTP requests currently being served.",
        )),
    )?;

    let orders_placed_total = register(
        &registry,
        IntCounter::new("orders_placed_total", "Orders placed successfully."),
    )?;

    let order_claim_conflicts_total = register(
        &registry,
        IntCounter::new(
            "order_claim_conflicts_total",
            "Orders rejected because another order claimed an item first.",
        ),
    )?;

    Some(Metrics {
        registry,
        requests_total,
        request_duration_seconds,
        requests_in_flight,
        orders_placed_total,
        order_claim_conflicts_total,
    })
}
