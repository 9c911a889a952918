//! Logout Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{accounts::errors::into_status_error, extensions::*, state::State};

/// Logout Handler
///
/// Clears the user from the session. The selected branch is kept.
#[endpoint(
    tags("accounts"),
    summary = "Logout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Logged out"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Login required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "accounts.logout",
    skip(depot),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;
    let context = depot
        .session_context()
        .ok_or_else(StatusError::unauthorized)?;

    tracing::Span::current().record("user_uuid", tracing::field::display(user));

    state
        .app
        .auth
        .sign_out(context.session)
        .await
        .map_err(into_status_error)?;

    tracing::info!("logged out");

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use dispensary_app::auth::{MockAuthService, Session};
    use jiff::Timestamp;
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::{TestServices, anonymous_with_branch, signed_in};

    use super::*;

    #[tokio::test]
    async fn test_logout_signs_out_presenting_session() -> TestResult {
        let context = signed_in();
        let mut auth = MockAuthService::new();

        auth.expect_sign_out()
            .once()
            .withf(move |session| *session == context.session)
            .return_once(move |session| {
                Ok(Session {
                    uuid: session,
                    user_uuid: None,
                    branch_uuid: context.branch,
                    created_at: Timestamp::UNIX_EPOCH,
                    updated_at: Timestamp::UNIX_EPOCH,
                })
            });

        let service = TestServices {
            auth,
            ..TestServices::default()
        }
        .service(context, Router::with_path("logout").get(handler));

        let res = TestClient::get("http://example.com/logout")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_logout_when_anonymous_returns_401() -> TestResult {
        let service = TestServices::default().service(
            anonymous_with_branch(),
            Router::with_path("logout").get(handler),
        );

        let res = TestClient::get("http://example.com/logout")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
