//! Integration test utilities for the expert hub server
//!
//! Spawns the real application against PostgreSQL with the identity
//! provider replaced by a `wiremock` server.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
