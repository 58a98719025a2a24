//! Route handlers

pub mod admin;
pub mod callback;
pub mod functions;
pub mod health;
pub mod profiles;
