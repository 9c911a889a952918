//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;

use crate::{
    auth::UserUuid,
    database::Db,
    domain::{
        carts::{
            errors::CartsServiceError,
            models::{Cart, CartItemUuid, CartLine, CartUpdate, NewCartItem},
            repository::SqliteCartItemsRepository,
        },
        catalog::{
            models::BranchUuid,
            repositories::{SqliteProductsRepository, SqliteStockRepository},
        },
    },
};

#[derive(Debug, Clone)]
pub struct SqliteCartsService {
    db: Db,
    items_repository: SqliteCartItemsRepository,
    products_repository: SqliteProductsRepository,
    stock_repository: SqliteStockRepository,
}

impl SqliteCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            items_repository: SqliteCartItemsRepository::new(),
            products_repository: SqliteProductsRepository::new(),
            stock_repository: SqliteStockRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for SqliteCartsService {
    async fn list_cart(
        &self,
        user: UserUuid,
        branch: BranchUuid,
    ) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let lines = self
            .items_repository
            .list_lines(&mut tx, user, branch)
            .await?;

        tx.commit().await?;

        Ok(Cart {
            user_uuid: user,
            branch_uuid: branch,
            lines,
        })
    }

    async fn add_to_cart(
        &self,
        user: UserUuid,
        branch: BranchUuid,
        item: NewCartItem,
    ) -> Result<CartLine, CartsServiceError> {
        if item.quantity < 1 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin_write().await?;

        self.products_repository
            .get_product(&mut tx, item.product_uuid)
            .await?;

        // Only the requested amount is checked; whatever is already in the cart is not.
        let available = self
            .stock_repository
            .available_quantity(&mut tx, branch, item.product_uuid)
            .await?;

        if item.quantity > available {
            return Err(CartsServiceError::InsufficientStock { available });
        }

        let line = self
            .items_repository
            .add_line(&mut tx, user, branch, item)
            .await?;

        tx.commit().await?;

        debug!(item = %line.uuid, quantity = line.quantity, "cart line added");

        Ok(line)
    }

    async fn update_quantity(
        &self,
        user: UserUuid,
        branch: BranchUuid,
        item: CartItemUuid,
        quantity: i64,
    ) -> Result<CartUpdate, CartsServiceError> {
        let mut tx = self.db.begin_write().await?;

        let mut line = self
            .items_repository
            .get_line(&mut tx, user, branch, item)
            .await?;

        if quantity <= 0 {
            self.items_repository
                .delete_line(&mut tx, user, branch, item)
                .await?;

            tx.commit().await?;

            return Ok(CartUpdate::Removed);
        }

        let available = self
            .stock_repository
            .available_quantity(&mut tx, branch, line.product_uuid)
            .await?;

        if quantity > available {
            return Err(CartsServiceError::InsufficientStock { available });
        }

        self.items_repository
            .set_quantity(&mut tx, user, branch, item, quantity)
            .await?;

        tx.commit().await?;

        line.quantity = quantity;

        Ok(CartUpdate::Updated(line))
    }

    async fn remove_item(
        &self,
        user: UserUuid,
        branch: BranchUuid,
        item: CartItemUuid,
    ) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin_write().await?;

        let rows_affected = self
            .items_repository
            .delete_line(&mut tx, user, branch, item)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the user's cart at the given branch, lines in the order they were added.
    async fn list_cart(&self, user: UserUuid, branch: BranchUuid)
    -> Result<Cart, CartsServiceError>;

    /// Add a product to the cart, merging into an existing line for the same product.
    async fn add_to_cart(
        &self,
        user: UserUuid,
        branch: BranchUuid,
        item: NewCartItem,
    ) -> Result<CartLine, CartsServiceError>;

    /// Set a line's quantity. Zero or less removes the line.
    async fn update_quantity(
        &self,
        user: UserUuid,
        branch: BranchUuid,
        item: CartItemUuid,
        quantity: i64,
    ) -> Result<CartUpdate, CartsServiceError>;

    /// Remove a line from the cart.
    async fn remove_item(
        &self,
        user: UserUuid,
        branch: BranchUuid,
        item: CartItemUuid,
    ) -> Result<(), CartsServiceError>;
}
