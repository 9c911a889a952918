//! Sessions Repository

use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, sqlite::SqliteRow};

use crate::{
    auth::models::{Session, SessionRecord, SessionUuid, UserUuid},
    database::{now_micros, try_get_optional_uuid, try_get_timestamp, try_get_uuid},
    domain::catalog::models::BranchUuid,
};

const CREATE_SESSION_SQL: &str = include_str!("../sql/create_session.sql");
const FIND_SESSION_SQL: &str = include_str!("../sql/find_session.sql");
const UPDATE_SESSION_BRANCH_SQL: &str = include_str!("../sql/update_session_branch.sql");
const CLEAR_SESSION_USER_SQL: &str = include_str!("../sql/clear_session_user.sql");
const DELETE_SESSION_SQL: &str = include_str!("../sql/delete_session.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteSessionsRepository;

impl SqliteSessionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_session(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        uuid: SessionUuid,
        token_hash: &str,
        user: Option<UserUuid>,
        branch: Option<BranchUuid>,
    ) -> Result<Session, sqlx::Error> {
        query_as::<Sqlite, Session>(CREATE_SESSION_SQL)
            .bind(uuid.into_uuid())
            .bind(token_hash)
            .bind(user.map(UserUuid::into_uuid))
            .bind(branch.map(BranchUuid::into_uuid))
            .bind(now_micros())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_session(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        uuid: SessionUuid,
    ) -> Result<Option<SessionRecord>, sqlx::Error> {
        query_as::<Sqlite, SessionRecord>(FIND_SESSION_SQL)
            .bind(uuid.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn update_branch(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        uuid: SessionUuid,
        branch: BranchUuid,
    ) -> Result<Session, sqlx::Error> {
        query_as::<Sqlite, Session>(UPDATE_SESSION_BRANCH_SQL)
            .bind(uuid.into_uuid())
            .bind(branch.into_uuid())
            .bind(now_micros())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn clear_user(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        uuid: SessionUuid,
    ) -> Result<Session, sqlx::Error> {
        query_as::<Sqlite, Session>(CLEAR_SESSION_USER_SQL)
            .bind(uuid.into_uuid())
            .bind(now_micros())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_session(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        uuid: SessionUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_SESSION_SQL)
            .bind(uuid.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Session {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: try_get_uuid(row, "uuid")?,
            user_uuid: try_get_optional_uuid(row, "user_uuid")?,
            branch_uuid: try_get_optional_uuid(row, "branch_uuid")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for SessionRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            session: Session::from_row(row)?,
            token_hash: row.try_get("token_hash")?,
        })
    }
}
