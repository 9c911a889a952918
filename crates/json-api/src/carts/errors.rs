//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use dispensary_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::InsufficientStock { available } => StatusError::conflict()
            .brief(format!("Only {available} units available"))
            .detail(available.to_string()),
        CartsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity must be at least 1")
        }
        CartsServiceError::NotFound => StatusError::not_found().brief("Cart item not found"),
        CartsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Cart item already exists")
        }
        CartsServiceError::InvalidReference
        | CartsServiceError::MissingRequiredData
        | CartsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid cart payload")
        }
        CartsServiceError::Sql(source) => {
            error!("cart operation failed: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn insufficient_stock_reports_available_quantity() {
        let error = into_status_error(CartsServiceError::InsufficientStock { available: 50 });

        assert_eq!(error.code, StatusCode::CONFLICT);
        assert_eq!(error.brief, "Only 50 units available");
        assert_eq!(error.detail.as_deref(), Some("50"));
    }
}
