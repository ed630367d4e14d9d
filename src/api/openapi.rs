//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::contact_handler;
use crate::domain::{Contact, ContactInput};
use crate::errors::{ErrorBody, ErrorResponse, FieldError};

/// OpenAPI documentation for the contact book
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Contact Book",
        version = "0.1.0",
        description = "Per-user contact management: every contact is visible only to the user who owns it",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        contact_handler::list_contacts,
        contact_handler::get_contact,
        contact_handler::new_contact,
        contact_handler::create_contact,
        contact_handler::edit_contact,
        contact_handler::update_contact,
        contact_handler::confirm_delete,
        contact_handler::delete_contact,
    ),
    components(
        schemas(
            Contact,
            ContactInput,
            ErrorResponse,
            ErrorBody,
            FieldError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Contacts", description = "Contacts owned by the authenticated user")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token issued by the identity provider"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_contact_routes() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        assert!(paths.contains_key("/contacts"));
        assert!(paths.contains_key("/contacts/{id}"));
        assert!(paths.contains_key("/contacts/{id}/edit"));
        assert!(paths.contains_key("/contacts/{id}/delete"));
    }
}
