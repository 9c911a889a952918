//! Get Account Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    accounts::{errors::into_status_error, models::AccountResponse},
    extensions::*,
    state::State,
};

/// Get Account Handler
///
/// Returns the account signed in on the presenting session.
#[endpoint(
    tags("accounts"),
    summary = "Get Account",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Signed-in account"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Login required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<AccountResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;

    let user = state
        .app
        .auth
        .get_user(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use dispensary_app::auth::{AuthServiceError, MockAuthService, User};
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{TEST_USER_UUID, TestServices, anonymous_with_branch, signed_in};

    use super::*;

    #[tokio::test]
    async fn test_get_account_returns_signed_in_user() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_get_user()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(|uuid| {
                Ok(User {
                    uuid,
                    name: "Jane Doe".to_string(),
                    email: "jane@example.com".to_string(),
                    created_at: Timestamp::UNIX_EPOCH,
                })
            });

        let service = TestServices {
            auth,
            ..TestServices::default()
        }
        .service(signed_in(), Router::with_path("account").get(handler));

        let mut res = TestClient::get("http://example.com/account")
            .send(&service)
            .await;

        let body: AccountResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.uuid, TEST_USER_UUID.into_uuid());
        assert_eq!(body.email, "jane@example.com");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_account_when_anonymous_returns_401() -> TestResult {
        let service = TestServices::default().service(
            anonymous_with_branch(),
            Router::with_path("account").get(handler),
        );

        let res = TestClient::get("http://example.com/account")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_account_for_deleted_user_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_get_user()
            .once()
            .return_once(|_| Err(AuthServiceError::NotFound));

        let service = TestServices {
            auth,
            ..TestServices::default()
        }
        .service(signed_in(), Router::with_path("account").get(handler));

        let res = TestClient::get("http://example.com/account")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
