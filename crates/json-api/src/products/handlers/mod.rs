//! Product Handlers

pub(crate) mod add_to_cart;
pub(crate) mod get;
