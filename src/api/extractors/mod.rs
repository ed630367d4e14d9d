//! Custom request extractors.

mod contact_form;
mod contact_id;

pub use contact_form::ContactForm;
pub use contact_id::ContactId;
