//! Checkout Errors

use salvo::http::StatusError;
use tracing::error;

use dispensary_app::domain::orders::OrdersServiceError;

pub(crate) const EMPTY_CART_MESSAGE: &str = "Your cart is empty.";

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::EmptyCart => StatusError::conflict().brief(EMPTY_CART_MESSAGE),
        OrdersServiceError::NotFound => StatusError::not_found(),
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => StatusError::bad_request().brief("Invalid order"),
        OrdersServiceError::Sql(source) => {
            error!("order operation failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
