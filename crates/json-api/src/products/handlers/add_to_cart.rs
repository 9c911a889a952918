//! Add To Cart Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use dispensary_app::domain::{
    carts::models::{CartItemUuid, NewCartItem},
    catalog::models::ProductUuid,
};

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Add To Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub(crate) struct AddToCartRequest {
    /// Units to add to the cart
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i64,
}

/// Cart Line Added Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineAddedResponse {
    /// The cart line holding the product
    pub uuid: Uuid,

    /// Quantity of the line after the addition
    pub quantity: i64,
}

/// Add To Cart Handler
///
/// Adds units of the product to the signed-in user's cart at the selected
/// branch. Only the requested amount is checked against stock.
#[endpoint(
    tags("products"),
    summary = "Add Product To Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product added to cart"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid quantity"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Login required"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Not enough stock at the branch"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.add_to_cart",
    skip(product, json, depot, res),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<AddToCartRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartLineAddedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;
    let branch = depot.selected_branch()?;

    tracing::Span::current().record("user_uuid", tracing::field::display(user));

    let request = json.into_inner();

    request.validate().or_400("Invalid quantity")?;

    let product = ProductUuid::from_uuid(product.into_inner());

    let line = state
        .app
        .carts
        .add_to_cart(
            user,
            branch,
            NewCartItem {
                uuid: CartItemUuid::new(),
                product_uuid: product,
                quantity: request.quantity,
            },
        )
        .await
        .map_err(into_status_error)?;

    info!(
        product = %product,
        branch = %branch,
        added = request.quantity,
        quantity = line.quantity,
        "added to cart"
    );

    res.add_header(LOCATION, "/cart", true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(CartLineAddedResponse {
        uuid: line.uuid.into_uuid(),
        quantity: line.quantity,
    }))
}

#[cfg(test)]
mod tests {
    use dispensary_app::domain::carts::{
        CartsServiceError, MockCartsService, models::CartLine,
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{
        TEST_BRANCH_UUID, TEST_USER_UUID, TestServices, anonymous_with_branch, signed_in,
    };

    use super::*;

    const ROUTE: &str = "product/{product}";

    fn add_url(product: ProductUuid) -> String {
        format!("http://example.com/product/{product}")
    }

    #[tokio::test]
    async fn test_add_to_cart_returns_created_line() -> TestResult {
        let product = ProductUuid::new();
        let line_uuid = CartItemUuid::new();
        let mut carts = MockCartsService::new();

        carts
            .expect_add_to_cart()
            .once()
            .withf(move |user, branch, item| {
                *user == TEST_USER_UUID
                    && *branch == TEST_BRANCH_UUID
                    && item.product_uuid == product
                    && item.quantity == 10
            })
            .return_once(move |_, _, item| {
                Ok(CartLine {
                    uuid: line_uuid,
                    product_uuid: item.product_uuid,
                    product_name: "Paracetamol 500mg".to_string(),
                    unit_price: 30_00,
                    quantity: 15,
                })
            });

        let service = TestServices {
            carts,
            ..TestServices::default()
        }
        .service(signed_in(), Router::with_path(ROUTE).post(handler));

        let mut res = TestClient::post(add_url(product))
            .json(&json!({ "quantity": 10 }))
            .send(&service)
            .await;

        let body: CartLineAddedResponse = res.take_json().await?;
        let location = res.headers().get(LOCATION).and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some("/cart"));
        assert_eq!(body.uuid, line_uuid.into_uuid());
        assert_eq!(body.quantity, 15, "merged line quantity is reported");

        Ok(())
    }

    #[tokio::test]
    async fn test_add_to_cart_requires_login() -> TestResult {
        let service = TestServices::default().service(
            anonymous_with_branch(),
            Router::with_path(ROUTE).post(handler),
        );

        let res = TestClient::post(add_url(ProductUuid::new()))
            .json(&json!({ "quantity": 1 }))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_to_cart_rejects_zero_quantity() -> TestResult {
        let service = TestServices::default()
            .service(signed_in(), Router::with_path(ROUTE).post(handler));

        let mut res = TestClient::post(add_url(ProductUuid::new()))
            .add_header("accept", "application/json", true)
            .json(&json!({ "quantity": 0 }))
            .send(&service)
            .await;

        let body = res.take_string().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(body.contains("quantity"), "unexpected body: {body}");
        assert!(
            body.contains("Quantity must be at least 1"),
            "unexpected body: {body}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_add_to_cart_over_stock_returns_409() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_to_cart()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::InsufficientStock { available: 50 }));

        let service = TestServices {
            carts,
            ..TestServices::default()
        }
        .service(signed_in(), Router::with_path(ROUTE).post(handler));

        let res = TestClient::post(add_url(ProductUuid::new()))
            .json(&json!({ "quantity": 60 }))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
