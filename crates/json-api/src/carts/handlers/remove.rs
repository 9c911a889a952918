//! Remove Cart Line Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;
use uuid::Uuid;

use dispensary_app::domain::carts::models::CartItemUuid;

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Remove Cart Line Handler
#[endpoint(
    tags("cart"),
    summary = "Remove Cart Line",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Line removed"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Login required"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart item not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.remove",
    skip(line, depot),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    line: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;
    let branch = depot.selected_branch()?;

    tracing::Span::current().record("user_uuid", tracing::field::display(user));

    let line = CartItemUuid::from_uuid(line.into_inner());

    state
        .app
        .carts
        .remove_item(user, branch, line)
        .await
        .map_err(into_status_error)?;

    info!(line = %line, "removed cart line");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use dispensary_app::domain::carts::{CartsServiceError, MockCartsService};
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::{
        TEST_BRANCH_UUID, TEST_USER_UUID, TestServices, anonymous_with_branch, signed_in,
    };

    use super::*;

    const ROUTE: &str = "cart/{line}";

    #[tokio::test]
    async fn test_remove_line_returns_no_content() -> TestResult {
        let line = CartItemUuid::new();
        let mut carts = MockCartsService::new();

        carts
            .expect_remove_item()
            .once()
            .withf(move |user, branch, item| {
                *user == TEST_USER_UUID && *branch == TEST_BRANCH_UUID && *item == line
            })
            .return_once(|_, _, _| Ok(()));

        let service = TestServices {
            carts,
            ..TestServices::default()
        }
        .service(signed_in(), Router::with_path(ROUTE).delete(handler));

        let res = TestClient::delete(format!("http://example.com/cart/{line}"))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_unknown_line_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_remove_item()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::NotFound));

        let service = TestServices {
            carts,
            ..TestServices::default()
        }
        .service(signed_in(), Router::with_path(ROUTE).delete(handler));

        let res = TestClient::delete(format!("http://example.com/cart/{}", CartItemUuid::new()))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_line_requires_login() -> TestResult {
        let service = TestServices::default().service(
            anonymous_with_branch(),
            Router::with_path(ROUTE).delete(handler),
        );

        let res = TestClient::delete(format!("http://example.com/cart/{}", CartItemUuid::new()))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
