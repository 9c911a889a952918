//! Users Repository

use sqlx::{FromRow, Row, Sqlite, Transaction, query_as, sqlite::SqliteRow};

use crate::{
    auth::models::{NewUserRecord, User, UserCredentials, UserUuid},
    database::{now_micros, try_get_timestamp, try_get_uuid},
};

const CREATE_USER_SQL: &str = include_str!("../sql/create_user.sql");
const GET_USER_SQL: &str = include_str!("../sql/get_user.sql");
const FIND_USER_CREDENTIALS_SQL: &str = include_str!("../sql/find_user_credentials.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteUsersRepository;

impl SqliteUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        user: NewUserRecord,
    ) -> Result<User, sqlx::Error> {
        query_as::<Sqlite, User>(CREATE_USER_SQL)
            .bind(user.uuid.into_uuid())
            .bind(user.name)
            .bind(user.email)
            .bind(user.password_hash)
            .bind(now_micros())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_user(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        user: UserUuid,
    ) -> Result<User, sqlx::Error> {
        query_as::<Sqlite, User>(GET_USER_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_credentials(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        email: &str,
    ) -> Result<Option<UserCredentials>, sqlx::Error> {
        query_as::<Sqlite, UserCredentials>(FIND_USER_CREDENTIALS_SQL)
            .bind(email)
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, SqliteRow> for User {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: try_get_uuid(row, "uuid")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            created_at: try_get_timestamp(row, "created_at")?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for UserCredentials {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            user: User::from_row(row)?,
            password_hash: row.try_get("password_hash")?,
        })
    }
}
