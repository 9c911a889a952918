//! Account Handlers

pub(crate) mod get;
pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod register;
