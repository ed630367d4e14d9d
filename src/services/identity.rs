//! Identity resolution - Turns a bearer credential into a caller identity.
//!
//! Tokens are issued elsewhere; this service only verifies them with the
//! shared secret and extracts the subject.

use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::domain::CallerId;
use crate::errors::{AppError, AppResult};

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Stable user identifier
    pub sub: String,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// Identity provider trait for dependency injection.
pub trait IdentityProvider: Send + Sync {
    /// Resolve a bearer token to the caller it was issued for
    fn resolve(&self, token: &str) -> AppResult<CallerId>;
}

/// HS256 token verifier sharing its secret with the issuing provider.
pub struct JwtIdentityProvider {
    key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityProvider {
    pub fn new(config: &Config) -> Self {
        let mut validation = Validation::default();
        if let Some(issuer) = &config.jwt_issuer {
            validation.set_issuer(&[issuer]);
            // A token without `iss` would otherwise pass the issuer check
            validation.set_required_spec_claims(&["exp", "iss"]);
        }

        Self {
            key: DecodingKey::from_secret(config.jwt_secret_bytes()),
            validation,
        }
    }
}

impl IdentityProvider for JwtIdentityProvider {
    fn resolve(&self, token: &str) -> AppResult<CallerId> {
        let token_data = decode::<Claims>(token, &self.key, &self.validation)?;

        let subject = token_data.claims.sub.trim();
        if subject.is_empty() {
            return Err(AppError::Unauthorized);
        }

        Ok(CallerId::new(subject))
    }
}
