//! Entity to model mappers
//!
//! Enum columns are stored as text, so row conversion is fallible:
//! - `TryFrom<Model> for Entity`: decode a row into a domain object
//! - `From<Model> for Entity` where every column maps directly

mod audit_log;
mod expert_profile;
mod notification;
mod profile;

use hub_core::error::DomainError;
use hub_core::value_objects::ParseEnumError;

/// A stored enum value the domain no longer recognizes
pub(crate) fn corrupt_column(e: ParseEnumError) -> DomainError {
    DomainError::DatabaseError(format!("Corrupt row: {e}"))
}
