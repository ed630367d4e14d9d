//! Service Container - Centralized service access.
//!
//! Wires the contact service to its repository and the identity provider to
//! the configured secret, behind `Arc<dyn ...>` so handlers and tests can
//! substitute either.

use std::sync::Arc;

use super::{ContactManager, ContactService, IdentityProvider, JwtIdentityProvider};
use crate::config::Config;
use crate::infra::ContactStore;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get contact service
    fn contacts(&self) -> Arc<dyn ContactService>;

    /// Get identity provider
    fn identity(&self) -> Arc<dyn IdentityProvider>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    contact_service: Arc<dyn ContactService>,
    identity_provider: Arc<dyn IdentityProvider>,
}

impl Services {
    /// Create a new service container from already-built services
    pub fn new(
        contact_service: Arc<dyn ContactService>,
        identity_provider: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            contact_service,
            identity_provider,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: &Config) -> Self {
        let repository = Arc::new(ContactStore::new(db));
        let contact_service = Arc::new(ContactManager::new(repository));
        let identity_provider = Arc::new(JwtIdentityProvider::new(config));

        Self {
            contact_service,
            identity_provider,
        }
    }
}

impl ServiceContainer for Services {
    fn contacts(&self) -> Arc<dyn ContactService> {
        self.contact_service.clone()
    }

    fn identity(&self) -> Arc<dyn IdentityProvider> {
        self.identity_provider.clone()
    }
}
