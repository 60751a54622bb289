//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the repository ports backed by PostgreSQL
//! via `diesel-async` and a `bb8` connection pool.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types.
//! - **Internal models**: row structs (`models.rs`) and the schema
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: database errors are mapped to the port error
//!   enums with fixed diagnostics; raw messages are only logged.
//!
//! # Example
//!
//! ```no_run
//! use inventory::outbound::persistence::{DbPool, DieselAssetRepository, PoolConfig};
//!
//! # async fn build() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/inventory")).await?;
//! let assets = DieselAssetRepository::new(pool.clone());
//! # let _ = assets;
//! # Ok(())
//! # }
//! ```

mod diesel_asset_repository;
mod diesel_error_mapping;
mod diesel_login_event_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_asset_repository::DieselAssetRepository;
pub use diesel_login_event_repository::DieselLoginEventRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
