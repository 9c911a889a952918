//! Order Models

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::{
    auth::UserUuid,
    domain::catalog::models::{BranchUuid, ProductUuid},
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItem>;

/// Lifecycle state of an order. Orders are only ever created as pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown order status `{0}`")]
pub struct UnknownOrderStatus(String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Pending" => Ok(Self::Pending),
            other => Err(UnknownOrderStatus(other.to_string())),
        }
    }
}

/// Order Model
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub branch_uuid: BranchUuid,
    pub status: OrderStatus,
    pub created_at: Timestamp,
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Sum of line totals at the prices captured when the order was placed.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.items.iter().map(OrderItem::total).sum()
    }
}

/// Order Item Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: u64,
}

impl OrderItem {
    #[must_use]
    pub fn total(&self) -> u64 {
        self.unit_price.saturating_mul(self.quantity.unsigned_abs())
    }
}

/// New Order Model
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NewOrder {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub branch_uuid: BranchUuid,
    pub status: OrderStatus,
    pub created_at: Timestamp,
}
