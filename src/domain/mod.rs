//! Domain layer - Core business entities and logic
//!
//! Contains the contact entity, the client-submitted contact form and its
//! validation rules, and the caller identity every operation is scoped by.

pub mod caller;
pub mod contact;

pub use caller::CallerId;
pub use contact::{Contact, ContactFields, ContactInput};
