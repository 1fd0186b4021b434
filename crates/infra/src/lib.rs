//! `taxgate-infra` — storage implementations of the auth repository
//! interfaces.
//!
//! Postgres for production, in-memory twins for tests and local development.

pub mod memory;
pub mod postgres;

#[cfg(test)]
mod integration_tests;

pub use memory::{
    InMemoryAdminRepository, InMemoryEmployeeRepository, InMemoryRoleRepository,
    InMemorySessionStore,
};
pub use postgres::{PgAdminRepository, PgEmployeeRepository, PgRoleRepository, PgSessionStore};
