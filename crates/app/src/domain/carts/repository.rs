//! Cart Items Repository

use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, query_scalar, sqlite::SqliteRow};
use uuid::Uuid;

use crate::{
    auth::UserUuid,
    database::{now_micros, try_get_amount, try_get_uuid},
    domain::{
        carts::models::{CartItemUuid, CartLine, NewCartItem},
        catalog::models::BranchUuid,
    },
};

const LIST_CART_LINES_SQL: &str = include_str!("sql/list_cart_lines.sql");
const GET_CART_LINE_SQL: &str = include_str!("sql/get_cart_line.sql");
const UPSERT_CART_ITEM_SQL: &str = include_str!("sql/upsert_cart_item.sql");
const SET_CART_ITEM_QUANTITY_SQL: &str = include_str!("sql/set_cart_item_quantity.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("sql/delete_cart_item.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteCartItemsRepository;

impl SqliteCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_lines(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        user: UserUuid,
        branch: BranchUuid,
    ) -> Result<Vec<CartLine>, sqlx::Error> {
        query_as::<Sqlite, CartLine>(LIST_CART_LINES_SQL)
            .bind(user.into_uuid())
            .bind(branch.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_line(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        user: UserUuid,
        branch: BranchUuid,
        item: CartItemUuid,
    ) -> Result<CartLine, sqlx::Error> {
        query_as::<Sqlite, CartLine>(GET_CART_LINE_SQL)
            .bind(item.into_uuid())
            .bind(user.into_uuid())
            .bind(branch.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Insert a line, or add to the quantity of the line already holding the product.
    pub(crate) async fn add_line(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        user: UserUuid,
        branch: BranchUuid,
        item: NewCartItem,
    ) -> Result<CartLine, sqlx::Error> {
        let uuid: Uuid = query_scalar(UPSERT_CART_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(user.into_uuid())
            .bind(branch.into_uuid())
            .bind(item.product_uuid.into_uuid())
            .bind(item.quantity)
            .bind(now_micros())
            .fetch_one(&mut **tx)
            .await?;

        self.get_line(tx, user, branch, CartItemUuid::from_uuid(uuid))
            .await
    }

    pub(crate) async fn set_quantity(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        user: UserUuid,
        branch: BranchUuid,
        item: CartItemUuid,
        quantity: i64,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SET_CART_ITEM_QUANTITY_SQL)
            .bind(item.into_uuid())
            .bind(user.into_uuid())
            .bind(branch.into_uuid())
            .bind(quantity)
            .bind(now_micros())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_line(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        user: UserUuid,
        branch: BranchUuid,
        item: CartItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(user.into_uuid())
            .bind(branch.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, SqliteRow> for CartLine {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: try_get_uuid(row, "uuid")?,
            product_uuid: try_get_uuid(row, "product_uuid")?,
            product_name: row.try_get("product_name")?,
            unit_price: try_get_amount(row, "unit_price")?,
            quantity: row.try_get("quantity")?,
        })
    }
}
