//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types. Rows (`models.rs`) and table definitions (`schema.rs`) stay internal
//! to this module, and every database failure is mapped to the owning port's
//! error enum.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use mockable::DefaultClock;
//! use subscriber_api::outbound::persistence::{DbPool, DieselSubscriberRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/subscribers")).await?;
//! let repo = DieselSubscriberRepository::new(pool, Arc::new(DefaultClock));
//! ```

mod diesel_activity_log;
mod diesel_subscriber_repository;
mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_activity_log::DieselActivityLog;
pub use diesel_subscriber_repository::DieselSubscriberRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
