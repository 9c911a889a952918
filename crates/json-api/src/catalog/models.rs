//! Catalog Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dispensary_app::domain::catalog::models::Product;

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    pub name: String,

    pub brand: Option<String>,

    pub category: Option<String>,

    pub description: Option<String>,

    pub image_filename: Option<String>,

    /// The price of the product in pence
    pub price: u64,

    /// Units held by the selected branch; zero when not stocked there
    pub available: i64,
}

impl ProductResponse {
    pub(crate) fn new(product: Product, available: i64) -> Self {
        Self {
            uuid: product.uuid.into_uuid(),
            name: product.name,
            brand: product.brand,
            category: product.category,
            description: product.description,
            image_filename: product.image_filename,
            price: product.price,
            available,
        }
    }
}
