//! # hub-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for the repository traits
//! defined in `hub-core`. It handles:
//!
//! - Connection pool management and migrations
//! - Database models with SQLx `FromRow` derives
//! - Model to entity conversions
//! - Conditioned status updates that report how many rows they touched
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hub_db::pool::{create_pool, DatabaseConfig};
//! use hub_db::repositories::PgProfileRepository;
//! use hub_core::traits::ProfileRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     let profiles = PgProfileRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{
    create_pool, create_pool_from_env, run_migrations, DatabaseConfig, PgPool,
    MIGRATIONS_DIR,
};
pub use repositories::{
    PgAuditLogRepository, PgExpertProfileRepository, PgNotificationRepository,
    PgProfileRepository,
};
