//! Per-request span, request id and completion logging.

mod ids;
mod parent_context;
mod spans;

use std::time::Instant;

use salvo::{
    Request, handler,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, error, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use super::{metrics, settings};

pub(crate) const REQUEST_ID_DEPOT_KEY: &str = "request_id";

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if req.uri().path() == "/metrics" {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let started = Instant::now();
    let request_id = ids::resolve_request_id(req.header::<String>(ids::REQUEST_ID_HEADER));

    depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());
    ids::set_request_id_header(res, &request_id);

    let method = req.method().to_string();
    let path = req.uri().path().to_owned();
    let route = spans::route_template(&path);
    let _in_flight = metrics::InFlightRequestGuard::track();

    let span = tracing::info_span!(
        parent: None,
        "http.request",
        otel.name = %format!("{method} {route}"),
        otel.kind = "server",
        request_id = %request_id,
        method = %method,
        path = %path,
        status = tracing::field::Empty,
        duration_ms = tracing::field::Empty
    );

    if settings::parent_propagation_enabled()
        && let Some(parent) = parent_context::extract_parent_context(req.headers())
        && let Err(source) = span.set_parent(parent)
    {
        warn!("failed to set parent context on request span: {source}");
    }

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    let elapsed = started.elapsed();
    let status = res.status_code.unwrap_or(salvo::http::StatusCode::OK);
    let duration_ms = elapsed.as_millis();
    let threshold_ms = u128::from(settings::slow_request_threshold_ms());

    metrics::observe_request(&method, &route, status.as_u16(), elapsed.as_secs_f64());

    span.record("status", status.as_u16());
    span.record("duration_ms", duration_ms);

    span.in_scope(|| {
        info!(status = status.as_u16(), duration_ms, "request completed");

        if status.is_server_error() {
            error!(status = status.as_u16(), %method, %path, "server error response");
        } else if status.is_client_error() {
            warn!(status = status.as_u16(), %method, %path, "client error response");
        }

        if duration_ms > threshold_ms {
            warn!(%method, %path, duration_ms, threshold_ms, "slow request");
        }
    });
}

#[cfg(test)]
mod tests {
    use salvo::{
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use super::*;

    #[handler]
    async fn echo_request_id(depot: &mut Depot, res: &mut Response) {
        let id = depot
            .get::<String>(REQUEST_ID_DEPOT_KEY)
            .cloned()
            .unwrap_or_default();

        res.render(id);
    }

    fn make_service() -> Service {
        Service::new(
            Router::new()
                .hoop(request_logging)
                .push(Router::with_path("ping").get(echo_request_id)),
        )
    }

    #[tokio::test]
    async fn incoming_request_id_is_kept_and_echoed() -> TestResult {
        let mut res = TestClient::get("http://example.com/ping")
            .add_header("x-request-id", "abc-123", true)
            .send(&make_service())
            .await;

        let header = res
            .headers()
            .get("x-request-id")
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);

        assert_eq!(header.as_deref(), Some("abc-123"));
        assert_eq!(res.take_string().await?, "abc-123");

        Ok(())
    }

    #[tokio::test]
    async fn missing_request_id_is_generated() -> TestResult {
        let mut res = TestClient::get("http://example.com/ping")
            .send(&make_service())
            .await;

        let body = res.take_string().await?;

        assert!(uuid::Uuid::parse_str(&body).is_ok());

        Ok(())
    }
}
