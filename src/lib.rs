//! Contact Book - Per-user contact management service
//!
//! Authenticated users keep a private list of contacts (name, phone,
//! e-mail). Every read and write is scoped to the calling user; a contact
//! owned by somebody else behaves exactly like one that does not exist.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Contact entity, input validation, caller identity
//! - **services**: Contact operations and identity resolution
//! - **infra**: Database, migrations, repositories, Redis
//! - **api**: HTTP handlers, middleware, and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! contact-book serve
//!
//! # Run migrations
//! contact-book migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{CallerId, Contact, ContactInput};
pub use errors::{AppError, AppResult};
pub use infra::{Cache, Database};
