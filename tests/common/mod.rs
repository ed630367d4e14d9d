//! Shared fixtures for integration tests.
//!
//! Each fixture opens its own in-memory SQLite database, so tests never
//! share rows.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};

use contact_book::api::{create_router, AppState};
use contact_book::config::Config;
use contact_book::domain::{CallerId, ContactInput};
use contact_book::infra::{ContactStore, Database};
use contact_book::services::{Claims, ContactManager};

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-chars";

pub fn test_config() -> Config {
    Config::new("sqlite::memory:", TEST_SECRET).expect("test config is valid")
}

/// Fresh migrated database
pub async fn test_database() -> Arc<Database> {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("in-memory database connects");
    Arc::new(db)
}

pub fn contact_store(db: &Database) -> ContactStore {
    ContactStore::new(db.get_connection())
}

pub fn contact_service(db: &Database) -> ContactManager {
    ContactManager::new(Arc::new(contact_store(db)))
}

/// Router over a fresh database, without rate limiting
pub async fn test_app() -> (Router, Arc<Database>) {
    let db = test_database().await;
    let state = AppState::from_config(db.clone(), None, &test_config());
    (create_router(state), db)
}

/// Identity token for `sub`, signed like the identity provider would
pub fn token_for(sub: &str) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: sub.to_string(),
        exp: (now + Duration::hours(1)).timestamp(),
        iat: Some(now.timestamp()),
        iss: None,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("token encodes")
}

pub fn caller(id: &str) -> CallerId {
    CallerId::new(id)
}

pub fn contact_input(name: &str, phone: &str, email: &str) -> ContactInput {
    ContactInput {
        name: name.to_string(),
        phone: phone.to_string(),
        email: Some(email.to_string()),
        ..Default::default()
    }
}
