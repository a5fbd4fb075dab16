//! Domain types and rules for role administration.
//!
//! Nothing in this crate touches HTTP or SQL. The persistence collaborators
//! are described by the traits in [`store`] and implemented in `rolegate-db`.

pub mod access;
pub mod error;
pub mod role;
pub mod role_service;
pub mod roles;
pub mod store;
pub mod types;
