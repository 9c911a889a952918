//! Accounts & Sessions

mod errors;
mod models;
mod password;
pub(crate) mod repositories;
mod service;
mod token;

pub use errors::*;
pub use models::*;
pub use service::*;
pub use token::*;
