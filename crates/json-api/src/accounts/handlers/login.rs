//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{accounts::errors::into_status_error, extensions::*, state::State};

/// Login Request
#[derive(Deserialize, ToSchema, Validate)]
pub(crate) struct LoginRequest {
    #[validate(email(message = "Email address is invalid"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginResponse {
    /// Bearer token for subsequent requests
    pub token: String,

    pub user_uuid: Uuid,

    /// Branch carried over from the presenting session
    pub branch_uuid: Option<Uuid>,
}

/// Login Handler
///
/// Opens a signed-in session. A branch already selected on the presenting
/// session is carried over, and that session is closed.
#[endpoint(
    tags("accounts"),
    summary = "Login",
    responses(
        (status_code = StatusCode::OK, description = "Logged in"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid login details"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid email or password"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "accounts.login",
    skip(json, depot),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<LoginResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    request.validate().or_400("Invalid login details")?;

    let user = state
        .app
        .auth
        .authenticate(&request.email, &request.password)
        .await
        .map_err(into_status_error)?;

    tracing::Span::current().record("user_uuid", tracing::field::display(user.uuid));

    let previous = depot.session_context();
    let branch = previous.and_then(|context| context.branch);

    let issued = state
        .app
        .auth
        .open_session(Some(user.uuid), branch)
        .await
        .map_err(into_status_error)?;

    if let Some(previous) = previous {
        state
            .app
            .auth
            .close_session(previous.session)
            .await
            .map_err(into_status_error)?;
    }

    tracing::info!(session_uuid = %issued.session.uuid, "logged in");

    Ok(Json(LoginResponse {
        token: issued.token,
        user_uuid: user.uuid.into_uuid(),
        branch_uuid: branch.map(|branch| branch.into_uuid()),
    }))
}

#[cfg(test)]
mod tests {
    use dispensary_app::{
        auth::{AuthServiceError, IssuedSession, MockAuthService, Session, SessionUuid, User},
        domain::catalog::models::BranchUuid,
    };
    use jiff::Timestamp;
    use salvo::{
        affix_state::inject,
        test::{ResponseExt, TestClient},
    };
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{
        TEST_BRANCH_UUID, TEST_USER_UUID, TestServices, anonymous_with_branch,
    };

    use super::*;

    fn user() -> User {
        User {
            uuid: TEST_USER_UUID,
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn issued(branch: Option<BranchUuid>) -> IssuedSession {
        IssuedSession {
            token: "ds_v1_new".to_string(),
            session: Session {
                uuid: SessionUuid::new(),
                user_uuid: Some(TEST_USER_UUID),
                branch_uuid: branch,
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            },
        }
    }

    fn credentials() -> serde_json::Value {
        json!({ "email": "jane@example.com", "password": "secret1" })
    }

    #[tokio::test]
    async fn test_login_carries_branch_and_closes_anonymous_session() -> TestResult {
        let anonymous = anonymous_with_branch();
        let mut auth = MockAuthService::new();

        auth.expect_authenticate()
            .once()
            .withf(|email, password| email == "jane@example.com" && password == "secret1")
            .return_once(|_, _| Ok(user()));

        auth.expect_open_session()
            .once()
            .withf(|user, branch| {
                *user == Some(TEST_USER_UUID) && *branch == Some(TEST_BRANCH_UUID)
            })
            .return_once(|_, branch| Ok(issued(branch)));

        auth.expect_close_session()
            .once()
            .withf(move |session| *session == anonymous.session)
            .return_once(|_| Ok(()));

        let service = TestServices {
            auth,
            ..TestServices::default()
        }
        .service(anonymous, Router::with_path("login").post(handler));

        let mut res = TestClient::post("http://example.com/login")
            .json(&credentials())
            .send(&service)
            .await;

        let body: LoginResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.token, "ds_v1_new");
        assert_eq!(body.branch_uuid, Some(TEST_BRANCH_UUID.into_uuid()));

        Ok(())
    }

    #[tokio::test]
    async fn test_login_without_session_opens_branchless_session() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate()
            .once()
            .return_once(|_, _| Ok(user()));

        auth.expect_open_session()
            .once()
            .withf(|user, branch| user.is_some() && branch.is_none())
            .return_once(|_, branch| Ok(issued(branch)));

        auth.expect_close_session().never();

        let state = TestServices {
            auth,
            ..TestServices::default()
        }
        .into_state();

        let service = Service::new(
            Router::new()
                .hoop(inject(state))
                .push(Router::with_path("login").post(handler)),
        );

        let mut res = TestClient::post("http://example.com/login")
            .json(&credentials())
            .send(&service)
            .await;

        let body: LoginResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.branch_uuid, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_login_with_bad_credentials_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate()
            .once()
            .return_once(|_, _| Err(AuthServiceError::InvalidCredentials));

        let service = TestServices {
            auth,
            ..TestServices::default()
        }
        .service(anonymous_with_branch(), Router::with_path("login").post(handler));

        let res = TestClient::post("http://example.com/login")
            .json(&credentials())
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
