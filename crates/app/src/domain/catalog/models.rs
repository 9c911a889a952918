//! Catalog Models

use crate::uuids::TypedUuid;

/// Branch UUID
pub type BranchUuid = TypedUuid<Branch>;

/// Branch Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub uuid: BranchUuid,
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
}

/// New Branch Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBranch {
    pub uuid: BranchUuid,
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
}

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Product Model
///
/// `price` is held in minor units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub uuid: ProductUuid,
    pub name: String,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub image_filename: Option<String>,
    pub price: u64,
}

/// New Product Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub image_filename: Option<String>,
    pub price: u64,
}

/// A product as listed for one branch, with the quantity that branch holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub product: Product,

    /// Zero when the branch has no stock row for the product. Negative after an oversell.
    pub available: i64,
}
