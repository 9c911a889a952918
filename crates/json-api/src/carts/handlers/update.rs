//! Update Cart Handler

use std::{collections::BTreeMap, sync::Arc};

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use dispensary_app::domain::carts::{CartsServiceError, models::CartUpdate};

use crate::{
    carts::{errors::into_status_error, models::CartResponse},
    extensions::*,
    state::State,
};

/// Update Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartRequest {
    /// New quantity per cart line, keyed by line UUID. Zero or less removes the line.
    pub quantities: BTreeMap<String, Value>,
}

/// Cart Updated Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartUpdatedResponse {
    pub cart: CartResponse,

    /// One message per line that kept its quantity because stock ran short
    pub notices: Vec<String>,
}

/// Update Cart Handler
///
/// Applies the submitted quantities line by line, in cart order. Lines whose
/// new quantity exceeds the branch stock keep their quantity and produce a
/// notice; values that are not integers are skipped.
#[endpoint(
    tags("cart"),
    summary = "Update Cart Quantities",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Quantities applied"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Login required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.update",
    skip(json, depot),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateCartRequest>,
    depot: &mut Depot,
) -> Result<Json<CartUpdatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;
    let branch = depot.selected_branch()?;

    tracing::Span::current().record("user_uuid", tracing::field::display(user));

    let quantities = json.into_inner().quantities;
    let carts = &state.app.carts;

    let cart = carts
        .list_cart(user, branch)
        .await
        .map_err(into_status_error)?;

    let mut notices = Vec::new();

    for line in cart.lines {
        let Some(value) = quantities.get(&line.uuid.to_string()) else {
            continue;
        };

        let Some(quantity) = parse_quantity(value) else {
            debug!(item = %line.uuid, "skipping unparseable quantity");

            continue;
        };

        match carts.update_quantity(user, branch, line.uuid, quantity).await {
            Ok(CartUpdate::Removed) => {
                info!(item = %line.uuid, branch = %branch, "cart line removed");
            }
            Ok(CartUpdate::Updated(updated)) => {
                info!(
                    item = %updated.uuid,
                    branch = %branch,
                    quantity = updated.quantity,
                    "cart line updated"
                );
            }
            Err(CartsServiceError::InsufficientStock { available }) => {
                notices.push(format!(
                    "Cannot set quantity higher than {available} for {}.",
                    line.product_name
                ));
            }
            Err(CartsServiceError::NotFound) => {}
            Err(error) => return Err(into_status_error(error)),
        }
    }

    let cart = carts
        .list_cart(user, branch)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartUpdatedResponse {
        cart: cart.into(),
        notices,
    }))
}

/// Integers and strings holding an integer are accepted.
fn parse_quantity(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
