//! Branches Repository

use sqlx::{FromRow, Row, Sqlite, Transaction, query_as, query_scalar, sqlite::SqliteRow};

use crate::{
    database::try_get_uuid,
    domain::catalog::models::{Branch, BranchUuid, NewBranch},
};

const LIST_BRANCHES_SQL: &str = include_str!("../sql/list_branches.sql");
const GET_BRANCH_SQL: &str = include_str!("../sql/get_branch.sql");
const CREATE_BRANCH_SQL: &str = include_str!("../sql/create_branch.sql");
const COUNT_BRANCHES_SQL: &str = include_str!("../sql/count_branches.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteBranchesRepository;

impl SqliteBranchesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_branches(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<Vec<Branch>, sqlx::Error> {
        query_as::<Sqlite, Branch>(LIST_BRANCHES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_branch(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        branch: BranchUuid,
    ) -> Result<Branch, sqlx::Error> {
        query_as::<Sqlite, Branch>(GET_BRANCH_SQL)
            .bind(branch.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_branch(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        branch: NewBranch,
    ) -> Result<Branch, sqlx::Error> {
        query_as::<Sqlite, Branch>(CREATE_BRANCH_SQL)
            .bind(branch.uuid.into_uuid())
            .bind(branch.name)
            .bind(branch.address)
            .bind(branch.phone)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn count_branches(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<i64, sqlx::Error> {
        query_scalar(COUNT_BRANCHES_SQL).fetch_one(&mut **tx).await
    }
}

impl<'r> FromRow<'r, SqliteRow> for Branch {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: try_get_uuid(row, "uuid")?,
            name: row.try_get("name")?,
            address: row.try_get("address")?,
            phone: row.try_get("phone")?,
        })
    }
}
