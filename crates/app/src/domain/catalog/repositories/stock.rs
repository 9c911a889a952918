//! Stock Repository

use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, query_scalar, sqlite::SqliteRow};

use crate::domain::catalog::models::{BranchUuid, CatalogEntry, Product, ProductUuid};

const LIST_CATALOG_SQL: &str = include_str!("../sql/list_catalog.sql");
const GET_STOCK_QUANTITY_SQL: &str = include_str!("../sql/get_stock_quantity.sql");
const SET_STOCK_QUANTITY_SQL: &str = include_str!("../sql/set_stock_quantity.sql");
const DECREMENT_STOCK_SQL: &str = include_str!("../sql/decrement_stock.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteStockRepository;

impl SqliteStockRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Quantity held by the branch, zero when the product is not stocked there.
    pub(crate) async fn available_quantity(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        branch: BranchUuid,
        product: ProductUuid,
    ) -> Result<i64, sqlx::Error> {
        let quantity: Option<i64> = query_scalar(GET_STOCK_QUANTITY_SQL)
            .bind(branch.into_uuid())
            .bind(product.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(quantity.unwrap_or(0))
    }

    pub(crate) async fn list_catalog(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        branch: BranchUuid,
    ) -> Result<Vec<CatalogEntry>, sqlx::Error> {
        query_as::<Sqlite, CatalogEntry>(LIST_CATALOG_SQL)
            .bind(branch.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn set_quantity(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        branch: BranchUuid,
        product: ProductUuid,
        quantity: i64,
    ) -> Result<(), sqlx::Error> {
        query(SET_STOCK_QUANTITY_SQL)
            .bind(branch.into_uuid())
            .bind(product.into_uuid())
            .bind(quantity)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Subtract without checking the remaining quantity. Returns 0 when no stock row exists.
    pub(crate) async fn decrement(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        branch: BranchUuid,
        product: ProductUuid,
        quantity: i64,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DECREMENT_STOCK_SQL)
            .bind(branch.into_uuid())
            .bind(product.into_uuid())
            .bind(quantity)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, SqliteRow> for CatalogEntry {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            product: Product::from_row(row)?,
            available: row.try_get("available")?,
        })
    }
}
