//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Cache, Database};
use crate::services::{ContactService, IdentityProvider, ServiceContainer, Services};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Contact service
    pub contact_service: Arc<dyn ContactService>,
    /// Resolves bearer tokens to callers
    pub identity: Arc<dyn IdentityProvider>,
    /// Redis cache; rate limiting is skipped without it
    pub cache: Option<Arc<Cache>>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, cache: Option<Arc<Cache>>, config: &Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);
        Self::from_services(&container, cache, database)
    }

    /// Create application state from any service container.
    pub fn from_services(
        services: &dyn ServiceContainer,
        cache: Option<Arc<Cache>>,
        database: Arc<Database>,
    ) -> Self {
        Self::new(services.contacts(), services.identity(), cache, database)
    }

    /// Create new application state with manually injected services.
    pub fn new(
        contact_service: Arc<dyn ContactService>,
        identity: Arc<dyn IdentityProvider>,
        cache: Option<Arc<Cache>>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            contact_service,
            identity,
            cache,
            database,
        }
    }
}
