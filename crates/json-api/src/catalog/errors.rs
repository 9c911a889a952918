//! Catalog Errors

use salvo::http::StatusError;
use tracing::error;

use dispensary_app::domain::catalog::CatalogServiceError;

pub(crate) fn into_status_error(error: CatalogServiceError) -> StatusError {
    match error {
        CatalogServiceError::NotFound => StatusError::not_found().brief("Not found"),
        CatalogServiceError::AlreadyExists => {
            StatusError::conflict().brief("Catalog entry already exists")
        }
        CatalogServiceError::InvalidReference
        | CatalogServiceError::MissingRequiredData
        | CatalogServiceError::InvalidData => StatusError::bad_request().brief("Invalid request"),
        CatalogServiceError::Sql(source) => {
            error!("catalog lookup failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
