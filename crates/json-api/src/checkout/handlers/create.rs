//! Place Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::ToSchema,
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{
    checkout::errors::into_status_error, extensions::*, observability::record_order_placed,
    state::State,
};

/// Order Placed Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderPlacedResponse {
    /// The unique identifier of the new order
    pub uuid: Uuid,

    /// Order total in pence
    pub total: u64,
}

/// Place Order Handler
///
/// Converts the cart at the selected branch into a pending order and
/// decrements branch stock by the ordered quantities.
#[endpoint(
    tags("checkout"),
    summary = "Place Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Login required"),
        (status_code = StatusCode::CONFLICT, description = "Cart is empty"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "checkout.place_order",
    skip(depot, res),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderPlacedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;
    let branch = depot.selected_branch()?;

    tracing::Span::current().record("user_uuid", tracing::field::display(user));

    let order = state
        .app
        .orders
        .place_order(user, branch)
        .await
        .map_err(into_status_error)?;

    record_order_placed();

    info!(order = %order.uuid, branch = %branch, total = order.total(), "checkout complete");

    res.add_header(LOCATION, "/orders", true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(OrderPlacedResponse {
        uuid: order.uuid.into_uuid(),
        total: order.total(),
    }))
}
