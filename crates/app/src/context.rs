//! App Context

use std::sync::Arc;

use sqlx::migrate::MigrateError;
use thiserror::Error;

use crate::{
    auth::{AuthService, SqliteAuthService},
    database::{self, Db},
    domain::{
        carts::{CartsService, SqliteCartsService},
        catalog::{CatalogService, SqliteCatalogService},
        orders::{OrdersService, SqliteOrdersService},
    },
    seeds,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply migrations")]
    Migrate(#[source] MigrateError),

    #[error("failed to seed database")]
    Seed(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// The database is created when missing, migrated, and seeded on first run.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting, migrating or seeding fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrate)?;

        let db = Db::new(pool);

        seeds::seed(&db).await.map_err(AppInitError::Seed)?;

        Ok(Self::from_db(db))
    }

    #[must_use]
    pub fn from_db(db: Db) -> Self {
        Self {
            catalog: Arc::new(SqliteCatalogService::new(db.clone())),
            carts: Arc::new(SqliteCartsService::new(db.clone())),
            orders: Arc::new(SqliteOrdersService::new(db.clone())),
            auth: Arc::new(SqliteAuthService::new(db)),
        }
    }
}
