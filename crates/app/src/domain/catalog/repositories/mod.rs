//! Catalog Repositories

mod branches;
mod products;
mod stock;

pub(crate) use branches::SqliteBranchesRepository;
pub(crate) use products::SqliteProductsRepository;
pub(crate) use stock::SqliteStockRepository;
