//! Account and session models.

use std::fmt;

use jiff::Timestamp;

use crate::{domain::catalog::models::BranchUuid, uuids::TypedUuid};

pub type UserUuid = TypedUuid<User>;

pub type SessionUuid = TypedUuid<Session>;

/// Registered customer account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub created_at: Timestamp,
}

/// Registration payload. The password is plaintext and only lives until hashed.
#[derive(Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct NewUserRecord {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub(crate) struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Visitor session. Anonymous visitors carry a session too, so the chosen
/// branch survives until they sign in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub uuid: SessionUuid,
    pub user_uuid: Option<UserUuid>,
    pub branch_uuid: Option<BranchUuid>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub(crate) struct SessionRecord {
    pub session: Session,
    pub token_hash: String,
}

/// Newly opened session with its one-time bearer token.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub session: Session,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_debug_hides_password() {
        let user = NewUser {
            name: "Pat".to_string(),
            email: "pat@example.com".to_string(),
            password: "hunter22".to_string(),
        };

        let debug = format!("{user:?}");

        assert!(!debug.contains("hunter22"), "password leaked: {debug}");
        assert!(debug.contains("pat@example.com"));
    }
}
