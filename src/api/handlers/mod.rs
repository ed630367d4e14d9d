//! HTTP request handlers.

pub mod contact_handler;

pub use contact_handler::contact_routes;
