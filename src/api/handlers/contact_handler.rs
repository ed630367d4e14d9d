//! Contact handlers.
//!
//! Every route runs behind the auth middleware, which places the caller's
//! `CallerId` in the request extensions.

use axum::{
    extract::State,
    response::{Json, Redirect},
    routing::get,
    Extension, Router,
};

use crate::api::extractors::{ContactForm, ContactId};
use crate::api::AppState;
use crate::config::CONTACTS_INDEX_PATH;
use crate::domain::{CallerId, Contact, ContactInput};
use crate::errors::{AppResult, ErrorResponse};

/// Create contact routes
pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_contacts).post(create_contact))
        .route("/new", get(new_contact))
        .route(
            "/:id",
            get(get_contact).put(update_contact).delete(delete_contact),
        )
        .route("/:id/edit", get(edit_contact).post(update_contact))
        .route("/:id/delete", get(confirm_delete).post(delete_contact))
}

/// List the caller's contacts
#[utoipa::path(
    get,
    path = "/contacts",
    tag = "Contacts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Contacts owned by the caller", body = Vec<Contact>),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn list_contacts(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerId>,
) -> AppResult<Json<Vec<Contact>>> {
    let contacts = state.contact_service.list_contacts(&caller).await?;
    Ok(Json(contacts))
}

/// Get contact details
#[utoipa::path(
    get,
    path = "/contacts/{id}",
    tag = "Contacts",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Contact ID")),
    responses(
        (status = 200, description = "Contact found", body = Contact),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Contact not found", body = ErrorResponse)
    )
)]
pub async fn get_contact(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerId>,
    ContactId(id): ContactId,
) -> AppResult<Json<Contact>> {
    let contact = state.contact_service.get_contact(&caller, id).await?;
    Ok(Json(contact))
}

/// Blank contact form
#[utoipa::path(
    get,
    path = "/contacts/new",
    tag = "Contacts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Empty contact form", body = ContactInput),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn new_contact() -> Json<ContactInput> {
    Json(ContactInput::default())
}

/// Create a contact owned by the caller
///
/// Any owner in the submission is ignored.
#[utoipa::path(
    post,
    path = "/contacts",
    tag = "Contacts",
    security(("bearer_auth" = [])),
    request_body(
        content = ContactInput,
        content_type = "application/x-www-form-urlencoded",
        description = "Also accepted as application/json"
    ),
    responses(
        (status = 303, description = "Created, redirects to the contact list"),
        (status = 400, description = "Validation error, submission echoed back", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn create_contact(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerId>,
    ContactForm(input): ContactForm<ContactInput>,
) -> AppResult<Redirect> {
    state.contact_service.create_contact(&caller, input).await?;
    Ok(Redirect::to(CONTACTS_INDEX_PATH))
}

/// Contact edit form
#[utoipa::path(
    get,
    path = "/contacts/{id}/edit",
    tag = "Contacts",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Contact ID")),
    responses(
        (status = 200, description = "Contact to edit", body = Contact),
        (status = 404, description = "Contact not found", body = ErrorResponse)
    )
)]
pub async fn edit_contact(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerId>,
    ContactId(id): ContactId,
) -> AppResult<Json<Contact>> {
    let contact = state.contact_service.get_contact(&caller, id).await?;
    Ok(Json(contact))
}

/// Overwrite one of the caller's contacts
///
/// The `id` in the body must match the path. Supplying the `version` last
/// read turns a stale edit into a conflict.
#[utoipa::path(
    put,
    path = "/contacts/{id}",
    tag = "Contacts",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Contact ID")),
    request_body(
        content = ContactInput,
        content_type = "application/x-www-form-urlencoded",
        description = "Also accepted as application/json, or POSTed to /contacts/{id}/edit"
    ),
    responses(
        (status = 303, description = "Updated, redirects to the contact list"),
        (status = 400, description = "Validation error, submission echoed back", body = ErrorResponse),
        (status = 404, description = "Contact not found or id mismatch", body = ErrorResponse),
        (status = 409, description = "Contact changed concurrently", body = ErrorResponse)
    )
)]
pub async fn update_contact(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerId>,
    ContactId(id): ContactId,
    ContactForm(input): ContactForm<ContactInput>,
) -> AppResult<Redirect> {
    state
        .contact_service
        .update_contact(&caller, id, input)
        .await?;
    Ok(Redirect::to(CONTACTS_INDEX_PATH))
}

/// Contact delete confirmation
#[utoipa::path(
    get,
    path = "/contacts/{id}/delete",
    tag = "Contacts",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Contact ID")),
    responses(
        (status = 200, description = "Contact to delete", body = Contact),
        (status = 404, description = "Contact not found", body = ErrorResponse)
    )
)]
pub async fn confirm_delete(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerId>,
    ContactId(id): ContactId,
) -> AppResult<Json<Contact>> {
    let contact = state.contact_service.get_contact(&caller, id).await?;
    Ok(Json(contact))
}

/// Delete one of the caller's contacts
///
/// Idempotent: deleting a missing contact also redirects.
#[utoipa::path(
    delete,
    path = "/contacts/{id}",
    tag = "Contacts",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Contact ID")),
    responses(
        (status = 303, description = "Deleted or already absent, redirects to the contact list"),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn delete_contact(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerId>,
    id: Option<ContactId>,
) -> AppResult<Redirect> {
    // A non-numeric id names no row, which is already the deleted state
    if let Some(ContactId(id)) = id {
        state.contact_service.delete_contact(&caller, id).await?;
    }
    Ok(Redirect::to(CONTACTS_INDEX_PATH))
}
