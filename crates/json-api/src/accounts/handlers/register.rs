//! Register Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::Deserialize;
use validator::Validate;

use dispensary_app::auth::NewUser;

use crate::{
    accounts::{errors::into_status_error, models::AccountResponse},
    extensions::*,
    state::State,
};

/// Register Request
#[derive(Deserialize, ToSchema, Validate)]
pub(crate) struct RegisterRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be 2 to 100 characters"))]
    pub name: String,

    #[validate(email(message = "Email address is invalid"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[validate(must_match(other = "password", message = "Passwords must match"))]
    pub confirm_password: String,
}

impl From<RegisterRequest> for NewUser {
    fn from(request: RegisterRequest) -> Self {
        NewUser {
            name: request.name,
            email: request.email,
            password: request.password,
        }
    }
}

/// Register Handler
#[endpoint(
    tags("accounts"),
    summary = "Register",
    responses(
        (status_code = StatusCode::CREATED, description = "Account created; continue to login"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid account details"),
        (status_code = StatusCode::CONFLICT, description = "Email is already registered"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "accounts.register",
    skip(json, depot, res),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AccountResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    request.validate().or_400("Invalid account details")?;

    let user = state
        .app
        .auth
        .register(request.into())
        .await
        .map_err(into_status_error)?;

    tracing::Span::current().record("user_uuid", tracing::field::display(user.uuid));
    tracing::info!("registered user");

    res.add_header(LOCATION, "/login", true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use dispensary_app::auth::{AuthServiceError, MockAuthService, User, UserUuid};
    use jiff::Timestamp;
    use salvo::{
        affix_state::inject,
        test::{ResponseExt, TestClient},
    };
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::TestServices;

    use super::*;

    fn service(auth: MockAuthService) -> Service {
        let state = TestServices {
            auth,
            ..TestServices::default()
        }
        .into_state();

        Service::new(
            Router::new()
                .hoop(inject(state))
                .push(Router::with_path("register").post(handler)),
        )
    }

    fn valid_request() -> serde_json::Value {
        json!({
            "name": "Jane Doe",
            "email": "Jane@Example.com",
            "password": "secret1",
            "confirm_password": "secret1",
        })
    }

    #[tokio::test]
    async fn test_register_creates_account() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_register()
            .once()
            .withf(|user| user.email == "Jane@Example.com" && user.password == "secret1")
            .return_once(|user| {
                Ok(User {
                    uuid: UserUuid::new(),
                    name: user.name,
                    email: user.email.to_lowercase(),
                    created_at: Timestamp::UNIX_EPOCH,
                })
            });

        let mut res = TestClient::post("http://example.com/register")
            .json(&valid_request())
            .send(&service(auth))
            .await;

        let body: AccountResponse = res.take_json().await?;
        let location = res.headers().get(LOCATION).and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some("/login"));
        assert_eq!(body.email, "jane@example.com");

        Ok(())
    }

    #[tokio::test]
    async fn test_register_rejects_mismatched_confirmation() -> TestResult {
        let mut request = valid_request();

        request["confirm_password"] = json!("secret2");

        let mut res = TestClient::post("http://example.com/register")
            .add_header("accept", "application/json", true)
            .json(&request)
            .send(&service(MockAuthService::new()))
            .await;

        let body = res.take_string().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(body.contains("confirm_password"), "unexpected body: {body}");
        assert!(body.contains("Passwords must match"), "unexpected body: {body}");

        Ok(())
    }

    #[tokio::test]
    async fn test_register_rejects_short_password_and_bad_email() -> TestResult {
        let mut request = valid_request();

        request["email"] = json!("not-an-email");
        request["password"] = json!("abc");
        request["confirm_password"] = json!("abc");

        let mut res = TestClient::post("http://example.com/register")
            .json(&request)
            .send(&service(MockAuthService::new()))
            .await;

        let body = res.take_string().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(body.contains("email"), "unexpected body: {body}");
        assert!(body.contains("password"), "unexpected body: {body}");

        Ok(())
    }

    #[tokio::test]
    async fn test_register_duplicate_email_returns_409() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_register()
            .once()
            .return_once(|_| Err(AuthServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/register")
            .json(&valid_request())
            .send(&service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
