//! Orders service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rustc_hash::FxHashMap;
use tracing::{info, warn};

use crate::{
    auth::UserUuid,
    database::Db,
    domain::{
        carts::repository::SqliteCartItemsRepository,
        catalog::{models::BranchUuid, repositories::SqliteStockRepository},
        orders::{
            errors::OrdersServiceError,
            models::{NewOrder, Order, OrderItem, OrderStatus, OrderUuid},
            repositories::{SqliteOrderItemsRepository, SqliteOrdersRepository},
        },
    },
};

#[derive(Debug, Clone)]
pub struct SqliteOrdersService {
    db: Db,
    orders_repository: SqliteOrdersRepository,
    items_repository: SqliteOrderItemsRepository,
    cart_repository: SqliteCartItemsRepository,
    stock_repository: SqliteStockRepository,
}

impl SqliteOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders_repository: SqliteOrdersRepository::new(),
            items_repository: SqliteOrderItemsRepository::new(),
            cart_repository: SqliteCartItemsRepository::new(),
            stock_repository: SqliteStockRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for SqliteOrdersService {
    async fn place_order(
        &self,
        user: UserUuid,
        branch: BranchUuid,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin_write().await?;

        let lines = self
            .cart_repository
            .list_lines(&mut tx, user, branch)
            .await?;

        if lines.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let mut order = self
            .orders_repository
            .create_order(
                &mut tx,
                NewOrder {
                    uuid: OrderUuid::new(),
                    user_uuid: user,
                    branch_uuid: branch,
                    status: OrderStatus::Pending,
                    created_at: Timestamp::now(),
                },
            )
            .await?;

        order.items.reserve(lines.len());

        for line in &lines {
            let item = self
                .items_repository
                .create_from_cart_line(&mut tx, order.uuid, line)
                .await?;

            // Stock is not re-checked here, so concurrent checkouts can drive it negative.
            let decremented = self
                .stock_repository
                .decrement(&mut tx, branch, line.product_uuid, line.quantity)
                .await?;

            if decremented == 0 {
                warn!(
                    branch = %branch,
                    product = %line.product_uuid,
                    "no stock row to decrement"
                );
            }

            self.cart_repository
                .delete_line(&mut tx, user, branch, line.uuid)
                .await?;

            order.items.push(item);
        }

        tx.commit().await?;

        info!(
            order = %order.uuid,
            branch = %branch,
            items = order.items.len(),
            total = order.total(),
            "order placed"
        );

        Ok(order)
    }

    async fn list_orders(&self, user: UserUuid) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut orders = self.orders_repository.list_orders(&mut tx, user).await?;
        let items = self.items_repository.list_for_user(&mut tx, user).await?;

        tx.commit().await?;

        let mut items_by_order: FxHashMap<OrderUuid, Vec<OrderItem>> = FxHashMap::default();

        for item in items {
            items_by_order.entry(item.order_uuid).or_default().push(item);
        }

        for order in &mut orders {
            order.items = items_by_order.remove(&order.uuid).unwrap_or_default();
        }

        Ok(orders)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Turn the user's cart at the branch into a pending order, decrementing stock and
    /// clearing the cart.
    async fn place_order(
        &self,
        user: UserUuid,
        branch: BranchUuid,
    ) -> Result<Order, OrdersServiceError>;

    /// Orders placed by the user at any branch, newest first.
    async fn list_orders(&self, user: UserUuid) -> Result<Vec<Order>, OrdersServiceError>;
}
