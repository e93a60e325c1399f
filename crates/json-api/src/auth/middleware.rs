//! Auth middleware.
//!
//! Requests without an `Authorization` header continue anonymously. A header
//! that is present but not a valid bearer token is rejected here. Routes that
//! need a caller add [`require_principal`] so anonymous requests get a 401
//! before their body is parsed.

use std::sync::Arc;

use rugs_app::auth::AuthServiceError;
use salvo::{Scribe, http::header::AUTHORIZATION, prelude::*};
use tracing::error;

use crate::{errors::ApiError, extensions::*};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if req.headers().get(AUTHORIZATION).is_none() {
        ctrl.call_next(req, depot, res).await;

        return;
    }

    let Some(token) = extract_bearer_token(req) else {
        reject(res, ctrl, ApiError::Unauthorized);

        return;
    };

    let auth = match depot.state() {
        Ok(state) => Arc::clone(&state.app.auth),
        Err(error) => {
            reject(res, ctrl, error);

            return;
        }
    };

    match auth.authenticate_bearer(token).await {
        Ok(principal) => depot.insert_principal(principal),
        Err(AuthServiceError::NotFound) => {
            reject(res, ctrl, ApiError::Unauthorized);

            return;
        }
        Err(AuthServiceError::Sql(source)) => {
            error!("failed to validate api token: {source}");
            reject(res, ctrl, ApiError::Internal);

            return;
        }
        Err(AuthServiceError::Token(source)) => {
            error!("failed to process api token: {source}");
            reject(res, ctrl, ApiError::Internal);

            return;
        }
    }

    ctrl.call_next(req, depot, res).await;
}

/// Rejects anonymous requests.
#[salvo::handler]
pub(crate) async fn require_principal(
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if depot.principal().is_none() {
        reject(res, ctrl, ApiError::Unauthorized);
    }
}

fn reject(res: &mut Response, ctrl: &mut FlowCtrl, error: ApiError) {
    error.render(res);
    ctrl.skip_rest();
}

/// The token from an `Authorization: Bearer <token>` header.
pub(crate) fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}

#[cfg(test)]
mod tests {
    use rugs_app::{auth::MockAuthService, domain::access::Principal};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, TEST_USER_UUID};

    use super::*;

    #[salvo::handler]
    async fn echo_principal(depot: &mut Depot, res: &mut Response) {
        let principal = depot.principal().map_or_else(
            || "anonymous".to_string(),
            |principal| format!("{} staff={}", principal.user, principal.is_staff),
        );

        res.render(principal);
    }

    fn make_service(auth: MockAuthService) -> Service {
        let mocks = Mocks {
            auth,
            ..Mocks::default()
        };

        Service::new(
            Router::new()
                .hoop(salvo::affix_state::inject(mocks.into_state()))
                .hoop(handler)
                .push(Router::new().get(echo_principal)),
        )
    }

    #[tokio::test]
    async fn missing_header_continues_anonymously() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer().never();

        let mut res = TestClient::get("http://example.com")
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "anonymous");

        Ok(())
    }

    #[tokio::test]
    async fn required_principal_rejects_anonymous_requests() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer().never();

        let service = Service::new(
            Router::new()
                .hoop(salvo::affix_state::inject(
                    Mocks {
                        auth,
                        ..Mocks::default()
                    }
                    .into_state(),
                ))
                .hoop(handler)
                .hoop(require_principal)
                .push(Router::new().get(echo_principal)),
        );

        let res = TestClient::get("http://example.com").send(&service).await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn required_principal_lets_callers_through() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .return_once(|_| Ok(Principal::user(TEST_USER_UUID)));

        let service = Service::new(
            Router::new()
                .hoop(salvo::affix_state::inject(
                    Mocks {
                        auth,
                        ..Mocks::default()
                    }
                    .into_state(),
                ))
                .hoop(handler)
                .hoop(require_principal)
                .push(Router::new().get(echo_principal)),
        );

        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer rg_v1_good", true)
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(
            res.take_string().await?,
            format!("{TEST_USER_UUID} staff=false")
        );

        Ok(())
    }

    #[tokio::test]
    async fn non_bearer_header_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer().never();

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Basic abc123", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_token_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .withf(|token| token == "rg_v1_nope")
            .return_once(|_| Err(AuthServiceError::NotFound));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer rg_v1_nope", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn valid_token_injects_the_principal() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .withf(|token| token == "rg_v1_good")
            .return_once(|_| Ok(Principal::staff(TEST_USER_UUID)));

        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "bearer rg_v1_good", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(
            res.take_string().await?,
            format!("{TEST_USER_UUID} staff=true")
        );

        Ok(())
    }
}
