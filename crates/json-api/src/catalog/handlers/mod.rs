//! Catalog Handlers

pub(crate) mod index;
