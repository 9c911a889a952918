//! Checkout Summary Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{errors::into_status_error, models::CartResponse},
    checkout::errors::EMPTY_CART_MESSAGE,
    extensions::*,
    state::State,
};

/// Checkout Summary Handler
///
/// The cart about to be ordered. An empty cart cannot be checked out.
#[endpoint(
    tags("checkout"),
    summary = "Review Checkout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart ready for checkout"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Login required"),
        (status_code = StatusCode::CONFLICT, description = "Cart is empty"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;
    let branch = depot.selected_branch()?;

    let cart = state
        .app
        .carts
        .list_cart(user, branch)
        .await
        .map_err(into_status_error)?;

    if cart.is_empty() {
        return Err(StatusError::conflict().brief(EMPTY_CART_MESSAGE));
    }

    Ok(Json(cart.into()))
}
