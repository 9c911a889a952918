//! Order History Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dispensary_app::domain::orders::models::{Order, OrderItem};

use crate::{checkout::errors::into_status_error, extensions::*, state::State};

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub product_uuid: Uuid,

    pub product_name: String,

    pub quantity: i64,

    /// Price per unit when the order was placed, in pence
    pub unit_price: u64,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            product_uuid: item.product_uuid.into_uuid(),
            product_name: item.product_name,
            quantity: item.quantity,
            unit_price: item.unit_price,
        }
    }
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,

    pub branch_uuid: Uuid,

    pub status: String,

    /// RFC 3339 timestamp of when the order was placed
    pub created_at: String,

    pub items: Vec<OrderItemResponse>,

    pub total: u64,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            total: order.total(),
            uuid: order.uuid.into_uuid(),
            branch_uuid: order.branch_uuid.into_uuid(),
            status: order.status.to_string(),
            created_at: order.created_at.to_string(),
            items: order.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Order History Handler
///
/// Orders placed by the signed-in user at any branch, newest first.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order history"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Login required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<OrderResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;

    let orders = state
        .app
        .orders
        .list_orders(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use dispensary_app::domain::orders::{
        MockOrdersService,
        models::{OrderStatus, OrderUuid},
    };
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{TEST_BRANCH_UUID, TEST_USER_UUID, TestServices, signed_in};

    use super::*;

    fn order(uuid: OrderUuid) -> Order {
        Order {
            uuid,
            user_uuid: TEST_USER_UUID,
            branch_uuid: TEST_BRANCH_UUID,
            status: OrderStatus::Pending,
            created_at: Timestamp::UNIX_EPOCH,
            items: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_orders_are_listed_in_service_order() -> TestResult {
        let newer = OrderUuid::new();
        let older = OrderUuid::new();
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(move |_| Ok(vec![order(newer), order(older)]));

        let service = TestServices {
            orders,
            ..TestServices::default()
        }
        .service(signed_in(), Router::with_path("orders").get(handler));

        let mut res = TestClient::get("http://example.com/orders")
            .send(&service)
            .await;

        let body: Vec<OrderResponse> = res.take_json().await?;
        let uuids: Vec<Uuid> = body.iter().map(|o| o.uuid).collect();

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(uuids, vec![newer.into_uuid(), older.into_uuid()]);
        assert!(body.iter().all(|o| o.status == "Pending"));
        assert_eq!(
            body.first().map(|o| o.created_at.as_str()),
            Some("1970-01-01T00:00:00Z")
        );

        Ok(())
    }
}
