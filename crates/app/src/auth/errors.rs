//! Auth service errors.

use argon2::password_hash;
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::auth::SessionTokenError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("account already exists")]
    AlreadyExists,

    #[error("account or session not found")]
    NotFound,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("session token processing error")]
    Token(#[source] SessionTokenError),

    #[error("password hashing error: {0}")]
    PasswordHash(password_hash::Error),

    #[error("password hashing task failed")]
    PasswordTask(#[source] tokio::task::JoinError),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<SessionTokenError> for AuthServiceError {
    fn from(error: SessionTokenError) -> Self {
        Self::Token(error)
    }
}

impl From<password_hash::Error> for AuthServiceError {
    fn from(error: password_hash::Error) -> Self {
        Self::PasswordHash(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert!(matches!(
            AuthServiceError::from(Error::RowNotFound),
            AuthServiceError::NotFound
        ));
    }

    #[test]
    fn token_errors_are_wrapped() {
        assert!(matches!(
            AuthServiceError::from(SessionTokenError::InvalidFormat),
            AuthServiceError::Token(SessionTokenError::InvalidFormat)
        ));
    }
}
