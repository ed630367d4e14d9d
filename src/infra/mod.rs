//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connection, migrations and the contact repository
//! - Redis (rate limiting)

pub mod cache;
pub mod db;
pub mod repositories;

pub use cache::Cache;
pub use db::{Database, Migrator};
pub use repositories::{ContactRepository, ContactStore};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockContactRepository;
