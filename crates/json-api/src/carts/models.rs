//! Cart Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dispensary_app::domain::carts::models::{Cart, CartLine};

/// Cart Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    /// The unique identifier of the cart line
    pub uuid: Uuid,

    pub product_uuid: Uuid,

    pub product_name: String,

    /// Current price of the product in pence
    pub unit_price: u64,

    pub quantity: i64,

    pub total: u64,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        Self {
            total: line.total(),
            uuid: line.uuid.into_uuid(),
            product_uuid: line.product_uuid.into_uuid(),
            product_name: line.product_name,
            unit_price: line.unit_price,
            quantity: line.quantity,
        }
    }
}

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    pub branch_uuid: Uuid,

    /// Lines in the order they were added
    pub lines: Vec<CartLineResponse>,

    /// Sum of all line totals in pence
    pub total: u64,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            total: cart.total(),
            branch_uuid: cart.branch_uuid.into_uuid(),
            lines: cart.lines.into_iter().map(Into::into).collect(),
        }
    }
}
