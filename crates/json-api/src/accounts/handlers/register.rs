//! Register Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use rugs_app::domain::users::data::Registration;

use crate::{accounts::models::SessionResponse, errors::ApiError, extensions::*};

/// Register Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,

    /// Must equal `password`
    pub confirmation: Option<String>,

    /// Defaults to `true`
    pub receive_emails_order_updates: Option<bool>,

    /// Defaults to `false`
    pub receive_emails_new_items: Option<bool>,
}

impl From<RegisterRequest> for Registration {
    fn from(request: RegisterRequest) -> Self {
        Registration {
            username: request.username,
            email: request.email,
            password: request.password,
            confirmation: request.confirmation,
            receive_emails_order_updates: request.receive_emails_order_updates,
            receive_emails_new_items: request.receive_emails_new_items,
        }
    }
}

/// Register Handler
///
/// Creates a regular user and logs them in.
#[endpoint(
    tags("accounts"),
    summary = "Register",
    responses(
        (status_code = StatusCode::CREATED, description = "User created"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SessionResponse>, ApiError> {
    let state = depot.state()?;

    let user = state.app.users.register(json.into_inner().into()).await?;
    let issued = state.app.auth.issue_token(user.uuid).await?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(SessionResponse::new(user, issued)))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use rugs_app::domain::{
        users::{UsersServiceError, records::UserUuid},
        validation::ValidationErrors,
    };

    use crate::test_helpers::{Mocks, make_issued_token, make_user};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(None, Router::with_path("register").post(handler))
    }

    #[tokio::test]
    async fn registration_returns_user_and_token() -> TestResult {
        let uuid = UserUuid::new();
        let issued = make_issued_token(uuid);
        let token = issued.token.clone();

        let mut mocks = Mocks::default();

        mocks
            .users
            .expect_register()
            .once()
            .withf(|form| {
                form.username.as_deref() == Some("weaver")
                    && form.confirmation.as_deref() == Some("hunter22")
                    && form.receive_emails_new_items.is_none()
            })
            .return_once(move |_| Ok(make_user(uuid, "weaver")));

        mocks
            .auth
            .expect_issue_token()
            .once()
            .withf(move |user| *user == uuid)
            .return_once(move |_| Ok(issued));

        let mut res = TestClient::post("http://example.com/register")
            .json(&json!({
                "username": "weaver",
                "email": "weaver@example.com",
                "password": "hunter22",
                "confirmation": "hunter22",
            }))
            .send(&make_service(mocks))
            .await;

        let body: SessionResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.user.username, "weaver");
        assert_eq!(body.token, token);
        assert!(body.expires_at.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn taken_username_returns_field_errors() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.users.expect_register().once().return_once(|_| {
            Err(UsersServiceError::Validation(ValidationErrors::single(
                "username",
                "Username is already taken",
            )))
        });
        mocks.auth.expect_issue_token().never();

        let mut res = TestClient::post("http://example.com/register")
            .json(&json!({ "username": "weaver" }))
            .send(&make_service(mocks))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body, json!({ "username": "Username is already taken" }));

        Ok(())
    }
}
