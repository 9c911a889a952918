//! Catalog & Stock

pub mod errors;
pub mod models;
pub(crate) mod repositories;
pub mod service;

pub use errors::CatalogServiceError;
pub use service::*;
