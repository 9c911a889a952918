//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info};

use crate::{
    auth::{
        AuthServiceError, IssuedSession, NewUser, Session, SessionTokenVersion, SessionUuid, User,
        UserUuid, format_session_token, generate_session_secret, hash_session_secret,
        models::NewUserRecord,
        parse_session_token,
        password::{hash_password_blocking, verify_password_blocking},
        repositories::{SqliteSessionsRepository, SqliteUsersRepository},
        token::verifiers_match,
    },
    database::Db,
    domain::catalog::models::BranchUuid,
};

#[derive(Debug, Clone)]
pub struct SqliteAuthService {
    db: Db,
    users_repository: SqliteUsersRepository,
    sessions_repository: SqliteSessionsRepository,
}

impl SqliteAuthService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            users_repository: SqliteUsersRepository::new(),
            sessions_repository: SqliteSessionsRepository::new(),
        }
    }
}

/// Emails are compared case-insensitively by storing them lower-cased.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl AuthService for SqliteAuthService {
    async fn register(&self, user: NewUser) -> Result<User, AuthServiceError> {
        let name = user.name.trim().to_string();
        let email = normalize_email(&user.email);

        if name.is_empty() || email.is_empty() || user.password.is_empty() {
            return Err(AuthServiceError::MissingRequiredData);
        }

        let password_hash = hash_password_blocking(user.password).await?;

        let mut tx = self.db.begin_write().await?;

        let user = self
            .users_repository
            .create_user(
                &mut tx,
                NewUserRecord {
                    uuid: UserUuid::new(),
                    name,
                    email,
                    password_hash,
                },
            )
            .await?;

        tx.commit().await?;

        info!(user = %user.uuid, "account registered");

        Ok(user)
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let credentials = self
            .users_repository
            .find_credentials(&mut tx, &normalize_email(email))
            .await?;

        tx.commit().await?;

        let Some(credentials) = credentials else {
            return Err(AuthServiceError::InvalidCredentials);
        };

        if !verify_password_blocking(password.to_string(), credentials.password_hash).await? {
            return Err(AuthServiceError::InvalidCredentials);
        }

        Ok(credentials.user)
    }

    async fn get_user(&self, user: UserUuid) -> Result<User, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.users_repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn open_session(
        &self,
        user: Option<UserUuid>,
        branch: Option<BranchUuid>,
    ) -> Result<IssuedSession, AuthServiceError> {
        let uuid = SessionUuid::new();
        let version = SessionTokenVersion::V1;
        let secret = generate_session_secret();
        let token = format_session_token(uuid, version, &secret);
        let token_hash = hash_session_secret(uuid, version, &secret);

        let mut tx = self.db.begin_write().await?;

        let session = self
            .sessions_repository
            .create_session(&mut tx, uuid, &token_hash, user, branch)
            .await?;

        tx.commit().await?;

        debug!(session = %session.uuid, signed_in = user.is_some(), "session opened");

        Ok(IssuedSession { token, session })
    }

    async fn resolve_session(&self, token: &str) -> Result<Session, AuthServiceError> {
        let parsed =
            parse_session_token(token).map_err(|_malformed| AuthServiceError::NotFound)?;

        let mut tx = self.db.begin().await?;

        let record = self
            .sessions_repository
            .find_session(&mut tx, parsed.session_uuid)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        tx.commit().await?;

        let expected = hash_session_secret(parsed.session_uuid, parsed.version, &parsed.secret);

        if !verifiers_match(&record.token_hash, &expected) {
            return Err(AuthServiceError::NotFound);
        }

        Ok(record.session)
    }

    async fn select_branch(
        &self,
        session: SessionUuid,
        branch: BranchUuid,
    ) -> Result<Session, AuthServiceError> {
        let mut tx = self.db.begin_write().await?;

        let session = self
            .sessions_repository
            .update_branch(&mut tx, session, branch)
            .await?;

        tx.commit().await?;

        Ok(session)
    }

    async fn sign_out(&self, session: SessionUuid) -> Result<Session, AuthServiceError> {
        let mut tx = self.db.begin_write().await?;

        let session = self
            .sessions_repository
            .clear_user(&mut tx, session)
            .await?;

        tx.commit().await?;

        Ok(session)
    }

    async fn close_session(&self, session: SessionUuid) -> Result<(), AuthServiceError> {
        let mut tx = self.db.begin_write().await?;

        let rows_affected = self
            .sessions_repository
            .delete_session(&mut tx, session)
            .await?;

        if rows_affected == 0 {
            return Err(AuthServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account. The email is stored lower-cased and must be unique.
    async fn register(&self, user: NewUser) -> Result<User, AuthServiceError>;

    /// Check an email and password pair. Unknown emails and wrong passwords
    /// produce the same error.
    async fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthServiceError>;

    async fn get_user(&self, user: UserUuid) -> Result<User, AuthServiceError>;

    /// Create a session and return its bearer token. The token is not
    /// recoverable afterwards.
    async fn open_session(
        &self,
        user: Option<UserUuid>,
        branch: Option<BranchUuid>,
    ) -> Result<IssuedSession, AuthServiceError>;

    /// Look up the session a bearer token belongs to.
    async fn resolve_session(&self, token: &str) -> Result<Session, AuthServiceError>;

    async fn select_branch(
        &self,
        session: SessionUuid,
        branch: BranchUuid,
    ) -> Result<Session, AuthServiceError>;

    /// Detach the user from the session, keeping the selected branch.
    async fn sign_out(&self, session: SessionUuid) -> Result<Session, AuthServiceError>;

    async fn close_session(&self, session: SessionUuid) -> Result<(), AuthServiceError>;
}
