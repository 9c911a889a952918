//! Cart Models

use crate::{
    auth::UserUuid,
    domain::catalog::models::{BranchUuid, ProductUuid},
    uuids::TypedUuid,
};

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartLine>;

/// A user's cart at one branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    pub user_uuid: UserUuid,
    pub branch_uuid: BranchUuid,
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Sum of every line at current product prices.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.lines.iter().map(CartLine::total).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Cart line, joined with the product it refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub uuid: CartItemUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub unit_price: u64,
    pub quantity: i64,
}

impl CartLine {
    #[must_use]
    pub fn total(&self) -> u64 {
        self.unit_price.saturating_mul(self.quantity.unsigned_abs())
    }
}

/// New Cart Item Model
///
/// `uuid` is only used when the cart has no line for the product yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub uuid: CartItemUuid,
    pub product_uuid: ProductUuid,
    pub quantity: i64,
}

/// Outcome of setting a line's quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartUpdate {
    Removed,
    Updated(CartLine),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(unit_price: u64, quantity: i64) -> CartLine {
        CartLine {
            uuid: CartItemUuid::new(),
            product_uuid: ProductUuid::new(),
            product_name: "Paracetamol 500mg".to_string(),
            unit_price,
            quantity,
        }
    }

    #[test]
    fn cart_total_sums_line_totals() {
        let cart = Cart {
            user_uuid: UserUuid::new(),
            branch_uuid: BranchUuid::new(),
            lines: vec![line(30_00, 10), line(150_00, 2)],
        };

        assert_eq!(cart.total(), 600_00);
        assert!(!cart.is_empty());
    }

    #[test]
    fn empty_cart_totals_zero() {
        let cart = Cart {
            user_uuid: UserUuid::new(),
            branch_uuid: BranchUuid::new(),
            lines: Vec::new(),
        };

        assert_eq!(cart.total(), 0);
        assert!(cart.is_empty());
    }
}
