//! Contact service - Ownership-scoped contact operations.
//!
//! Every operation takes the resolved caller explicitly. Contacts owned by
//! anyone else behave exactly like missing ones.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{CallerId, Contact, ContactInput};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::ContactRepository;

/// Contact service trait for dependency injection.
#[async_trait]
pub trait ContactService: Send + Sync {
    /// List the caller's contacts
    async fn list_contacts(&self, caller: &CallerId) -> AppResult<Vec<Contact>>;

    /// Get one of the caller's contacts
    async fn get_contact(&self, caller: &CallerId, id: i32) -> AppResult<Contact>;

    /// Validate and create a contact owned by the caller
    async fn create_contact(&self, caller: &CallerId, input: ContactInput) -> AppResult<Contact>;

    /// Validate and overwrite one of the caller's contacts
    async fn update_contact(
        &self,
        caller: &CallerId,
        id: i32,
        input: ContactInput,
    ) -> AppResult<Contact>;

    /// Delete one of the caller's contacts; absent contacts are not an error
    async fn delete_contact(&self, caller: &CallerId, id: i32) -> AppResult<()>;
}

/// Concrete implementation of ContactService.
pub struct ContactManager {
    contacts: Arc<dyn ContactRepository>,
}

impl ContactManager {
    /// Create new contact service instance
    pub fn new(contacts: Arc<dyn ContactRepository>) -> Self {
        Self { contacts }
    }
}

#[async_trait]
impl ContactService for ContactManager {
    async fn list_contacts(&self, caller: &CallerId) -> AppResult<Vec<Contact>> {
        self.contacts.list_for_owner(caller).await
    }

    async fn get_contact(&self, caller: &CallerId, id: i32) -> AppResult<Contact> {
        self.contacts
            .find_for_owner(id, caller)
            .await?
            .ok_or_not_found()
    }

    async fn create_contact(&self, caller: &CallerId, input: ContactInput) -> AppResult<Contact> {
        // Any owner in the submission is ignored
        let fields = input.to_fields()?;
        let contact = self.contacts.create(caller, fields).await?;

        tracing::info!(caller = %caller, contact_id = contact.id, "Contact created");
        Ok(contact)
    }

    async fn update_contact(
        &self,
        caller: &CallerId,
        id: i32,
        input: ContactInput,
    ) -> AppResult<Contact> {
        if input.id != Some(id) {
            return Err(AppError::NotFound);
        }

        let fields = input.to_fields()?;

        match self.contacts.update(id, caller, fields, input.version).await {
            Ok(contact) => {
                tracing::info!(caller = %caller, contact_id = id, version = contact.version, "Contact updated");
                Ok(contact)
            }
            Err(AppError::ConcurrencyConflict) => {
                // Gone since it was read: report it missing. Still there: the
                // conflict is real and is not retried.
                if self.contacts.exists_for_owner(id, caller).await? {
                    tracing::warn!(caller = %caller, contact_id = id, "Concurrent contact update");
                    Err(AppError::ConcurrencyConflict)
                } else {
                    Err(AppError::NotFound)
                }
            }
            Err(e) => Err(e),
        }
    }

    async fn delete_contact(&self, caller: &CallerId, id: i32) -> AppResult<()> {
        let removed = self.contacts.delete_for_owner(id, caller).await?;

        if removed {
            tracing::info!(caller = %caller, contact_id = id, "Contact deleted");
        } else {
            tracing::debug!(caller = %caller, contact_id = id, "Delete of absent contact ignored");
        }

        Ok(())
    }
}
