//! Account Errors

use salvo::http::StatusError;
use tracing::error;

use dispensary_app::auth::AuthServiceError;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid email or password")
        }
        AuthServiceError::AlreadyExists => {
            StatusError::conflict().brief("Email is already registered")
        }
        AuthServiceError::NotFound => StatusError::unauthorized().brief("Session not found"),
        AuthServiceError::InvalidReference => StatusError::not_found().brief("Branch not found"),
        AuthServiceError::MissingRequiredData | AuthServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid account details")
        }
        AuthServiceError::Sql(source) => {
            error!("account storage failed: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Token(source) => {
            error!("failed to process session token: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::PasswordHash(source) => {
            error!("password hashing failed: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::PasswordTask(source) => {
            error!("password hashing task failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
