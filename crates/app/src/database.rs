//! Database connection management

use std::{str::FromStr, time::Duration};

use jiff::Timestamp;
use sqlx::{
    Row, Sqlite, SqlitePool, Transaction,
    migrate::MigrateError,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow},
};
use uuid::Uuid;

use crate::uuids::TypedUuid;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);
const MAX_CONNECTIONS: u32 = 8;

#[derive(Debug, Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Begin a read transaction.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction fails.
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
        self.pool.begin().await
    }

    /// Begin a transaction that takes the write lock up front.
    ///
    /// Writers queue on the busy timeout instead of failing when a
    /// concurrent writer commits after their snapshot was taken.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction fails.
    pub async fn begin_write(&self) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
        self.pool.begin_with("BEGIN IMMEDIATE").await
    }
}

/// Connect to the `SQLite` database, creating the file when missing.
///
/// # Errors
///
/// Returns an error if the URL is invalid or the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await
}

/// Apply pending schema migrations.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
pub async fn migrate(pool: &SqlitePool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

pub(crate) fn try_get_uuid<T>(row: &SqliteRow, col: &str) -> Result<TypedUuid<T>, sqlx::Error> {
    row.try_get::<Uuid, _>(col).map(TypedUuid::from_uuid)
}

pub(crate) fn try_get_optional_uuid<T>(
    row: &SqliteRow,
    col: &str,
) -> Result<Option<TypedUuid<T>>, sqlx::Error> {
    Ok(row
        .try_get::<Option<Uuid>, _>(col)?
        .map(TypedUuid::from_uuid))
}

pub(crate) fn try_get_amount(row: &SqliteRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

pub(crate) fn try_get_timestamp(row: &SqliteRow, col: &str) -> Result<Timestamp, sqlx::Error> {
    let micros: i64 = row.try_get(col)?;

    Timestamp::from_microsecond(micros).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

pub(crate) fn amount_to_i64(amount: u64, col: &str) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

/// Current time as stored in timestamp columns.
pub(crate) fn now_micros() -> i64 {
    Timestamp::now().as_microsecond()
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestDb;

    use super::*;

    #[tokio::test]
    async fn migrations_create_expected_tables() -> TestResult {
        let test_db = TestDb::new().await;

        let tables: Vec<String> =
            sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'table'")
                .fetch_all(test_db.pool())
                .await?;

        for table in [
            "branches",
            "cart_items",
            "order_items",
            "orders",
            "products",
            "sessions",
            "stock",
            "users",
        ] {
            assert!(
                tables.iter().any(|name| name == table),
                "missing table {table}"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn foreign_keys_are_enforced() -> TestResult {
        let test_db = TestDb::new().await;

        let result = sqlx::query(
            "INSERT INTO stock (branch_uuid, product_uuid, quantity) VALUES (?, ?, 1)",
        )
        .bind(Uuid::now_v7())
        .bind(Uuid::now_v7())
        .execute(test_db.pool())
        .await;

        assert!(result.is_err(), "dangling stock row should be rejected");

        Ok(())
    }

    #[test]
    fn negative_amounts_fail_to_convert() {
        assert!(u64::try_from(-1_i64).is_err());
        assert!(amount_to_i64(u64::MAX, "price").is_err());
    }
}
