//! Session resolution and route guards.

pub(crate) mod middleware;
