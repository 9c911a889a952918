//! Catalog service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::catalog::{
        errors::CatalogServiceError,
        models::{Branch, BranchUuid, CatalogEntry, Product, ProductUuid},
        repositories::{SqliteBranchesRepository, SqliteProductsRepository, SqliteStockRepository},
    },
};

#[derive(Debug, Clone)]
pub struct SqliteCatalogService {
    db: Db,
    branches_repository: SqliteBranchesRepository,
    products_repository: SqliteProductsRepository,
    stock_repository: SqliteStockRepository,
}

impl SqliteCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            branches_repository: SqliteBranchesRepository::new(),
            products_repository: SqliteProductsRepository::new(),
            stock_repository: SqliteStockRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for SqliteCatalogService {
    async fn list_branches(&self) -> Result<Vec<Branch>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let branches = self.branches_repository.list_branches(&mut tx).await?;

        tx.commit().await?;

        Ok(branches)
    }

    async fn get_branch(&self, branch: BranchUuid) -> Result<Branch, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let branch = self.branches_repository.get_branch(&mut tx, branch).await?;

        tx.commit().await?;

        Ok(branch)
    }

    async fn list_catalog(
        &self,
        branch: BranchUuid,
    ) -> Result<Vec<CatalogEntry>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        self.branches_repository.get_branch(&mut tx, branch).await?;

        let entries = self.stock_repository.list_catalog(&mut tx, branch).await?;

        tx.commit().await?;

        Ok(entries)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<Product, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self
            .products_repository
            .get_product(&mut tx, product)
            .await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn get_available_quantity(
        &self,
        branch: BranchUuid,
        product: ProductUuid,
    ) -> Result<i64, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let quantity = self
            .stock_repository
            .available_quantity(&mut tx, branch, product)
            .await?;

        tx.commit().await?;

        Ok(quantity)
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Retrieves all branches, ordered by name.
    async fn list_branches(&self) -> Result<Vec<Branch>, CatalogServiceError>;

    /// Retrieve a single branch.
    async fn get_branch(&self, branch: BranchUuid) -> Result<Branch, CatalogServiceError>;

    /// Every product with the quantity the given branch holds, ordered by product name.
    async fn list_catalog(
        &self,
        branch: BranchUuid,
    ) -> Result<Vec<CatalogEntry>, CatalogServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<Product, CatalogServiceError>;

    /// Quantity of a product held by a branch; zero when the branch does not stock it.
    async fn get_available_quantity(
        &self,
        branch: BranchUuid,
        product: ProductUuid,
    ) -> Result<i64, CatalogServiceError>;
}
