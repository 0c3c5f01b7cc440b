//! Command implementations.

pub mod routes;
pub mod session;
