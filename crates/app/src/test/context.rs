//! Test context for service-level integration tests.

use sqlx::query;

use crate::{
    auth::{SqliteAuthService, UserUuid},
    database::{Db, amount_to_i64},
    domain::{
        carts::SqliteCartsService,
        catalog::{
            SqliteCatalogService,
            models::{Branch, BranchUuid, NewBranch, NewProduct, Product, ProductUuid},
            repositories::{SqliteBranchesRepository, SqliteProductsRepository, SqliteStockRepository},
        },
        orders::SqliteOrdersService,
    },
};

use super::db::TestDb;

/// Stands in for an argon2 hash where a test never signs in.
const PLACEHOLDER_PASSWORD_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$placeholder$placeholder";

pub struct TestContext {
    pub db: TestDb,
    pub catalog: SqliteCatalogService,
    pub carts: SqliteCartsService,
    pub orders: SqliteOrdersService,
    pub auth: SqliteAuthService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        Self {
            catalog: SqliteCatalogService::new(db.clone()),
            carts: SqliteCartsService::new(db.clone()),
            orders: SqliteOrdersService::new(db.clone()),
            auth: SqliteAuthService::new(db),
            db: test_db,
        }
    }

    pub async fn create_branch(&self, name: &str) -> BranchUuid {
        let mut tx = self.db.begin_test_transaction().await;

        let branch: Branch = SqliteBranchesRepository::new()
            .create_branch(
                &mut tx,
                NewBranch {
                    uuid: BranchUuid::new(),
                    name: name.to_string(),
                    address: "1 Test Road, Cityville".to_string(),
                    phone: None,
                },
            )
            .await
            .expect("Failed to create test branch");

        tx.commit().await.expect("Failed to commit test branch");

        branch.uuid
    }

    pub async fn create_product(&self, name: &str, price: u64) -> Product {
        let mut tx = self.db.begin_test_transaction().await;

        let product = SqliteProductsRepository::new()
            .create_product(
                &mut tx,
                NewProduct {
                    uuid: ProductUuid::new(),
                    name: name.to_string(),
                    brand: None,
                    category: None,
                    description: None,
                    image_filename: None,
                    price,
                },
            )
            .await
            .expect("Failed to create test product");

        tx.commit().await.expect("Failed to commit test product");

        product
    }

    pub async fn set_stock(&self, branch: BranchUuid, product: ProductUuid, quantity: i64) {
        let mut tx = self.db.begin_test_transaction().await;

        SqliteStockRepository::new()
            .set_quantity(&mut tx, branch, product, quantity)
            .await
            .expect("Failed to set test stock");

        tx.commit().await.expect("Failed to commit test stock");
    }

    /// Raw stock level; zero when no row exists.
    pub async fn stock_of(&self, branch: BranchUuid, product: ProductUuid) -> i64 {
        let mut tx = self.db.begin_test_transaction().await;

        SqliteStockRepository::new()
            .available_quantity(&mut tx, branch, product)
            .await
            .expect("Failed to read test stock")
    }

    pub async fn clear_stock(&self, branch: BranchUuid, product: ProductUuid) {
        query("DELETE FROM stock WHERE branch_uuid = ? AND product_uuid = ?")
            .bind(branch.into_uuid())
            .bind(product.into_uuid())
            .execute(self.db.pool())
            .await
            .expect("Failed to clear test stock");
    }

    pub async fn set_price(&self, product: ProductUuid, price: u64) {
        query("UPDATE products SET price = ? WHERE uuid = ?")
            .bind(amount_to_i64(price, "price").expect("price out of range"))
            .bind(product.into_uuid())
            .execute(self.db.pool())
            .await
            .expect("Failed to update test price");
    }

    /// Insert a user directly, skipping password hashing.
    pub async fn create_user(&self, email: &str) -> UserUuid {
        let uuid = UserUuid::new();

        query(
            "INSERT INTO users (uuid, name, email, password_hash, created_at) \
             VALUES (?, 'Test Patient', ?, ?, 0)",
        )
        .bind(uuid.into_uuid())
        .bind(email)
        .bind(PLACEHOLDER_PASSWORD_HASH)
        .execute(self.db.pool())
        .await
        .expect("Failed to create test user");

        uuid
    }

    /// A user, a branch and a 30.00 product stocked at that branch.
    pub async fn stocked_product(&self, quantity: i64) -> (UserUuid, BranchUuid, ProductUuid) {
        let user = self.create_user("patient@example.com").await;
        let branch = self.create_branch("Main Street Pharmacy").await;
        let product = self.create_product("Paracetamol 500mg", 30_00).await;

        self.set_stock(branch, product.uuid, quantity).await;

        (user, branch, product.uuid)
    }
}
