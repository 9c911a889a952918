//! Order Items Repository

use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, sqlite::SqliteRow};

use crate::{
    auth::UserUuid,
    database::{amount_to_i64, try_get_amount, try_get_uuid},
    domain::{
        carts::models::CartLine,
        orders::models::{OrderItem, OrderItemUuid, OrderUuid},
    },
};

const CREATE_ORDER_ITEM_SQL: &str = include_str!("../sql/create_order_item.sql");
const LIST_ORDER_ITEMS_FOR_USER_SQL: &str = include_str!("../sql/list_order_items_for_user.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteOrderItemsRepository;

impl SqliteOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Record a cart line against an order, keeping the line's current unit price.
    pub(crate) async fn create_from_cart_line(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        order: OrderUuid,
        line: &CartLine,
    ) -> Result<OrderItem, sqlx::Error> {
        let item = OrderItem {
            uuid: OrderItemUuid::new(),
            order_uuid: order,
            product_uuid: line.product_uuid,
            product_name: line.product_name.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
        };

        query(CREATE_ORDER_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(item.order_uuid.into_uuid())
            .bind(item.product_uuid.into_uuid())
            .bind(item.quantity)
            .bind(amount_to_i64(item.unit_price, "unit_price")?)
            .execute(&mut **tx)
            .await?;

        Ok(item)
    }

    pub(crate) async fn list_for_user(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        user: UserUuid,
    ) -> Result<Vec<OrderItem>, sqlx::Error> {
        query_as::<Sqlite, OrderItem>(LIST_ORDER_ITEMS_FOR_USER_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, SqliteRow> for OrderItem {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: try_get_uuid(row, "uuid")?,
            order_uuid: try_get_uuid(row, "order_uuid")?,
            product_uuid: try_get_uuid(row, "product_uuid")?,
            product_name: row.try_get("product_name")?,
            quantity: row.try_get("quantity")?,
            unit_price: try_get_amount(row, "unit_price")?,
        })
    }
}
