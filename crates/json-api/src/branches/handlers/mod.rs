//! Branch Handlers

pub(crate) mod index;
pub(crate) mod select;
