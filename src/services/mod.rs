//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

mod contact_service;
pub mod container;
mod identity;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use contact_service::{ContactManager, ContactService};
pub use identity::{Claims, IdentityProvider, JwtIdentityProvider};
