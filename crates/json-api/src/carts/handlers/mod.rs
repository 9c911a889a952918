//! Cart Handlers

pub(crate) mod get;
pub(crate) mod remove;
pub(crate) mod update;
