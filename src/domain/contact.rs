//! Contact domain entity and related types.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::config::PHONE_DIGITS;
use crate::errors::{AppError, AppResult, FieldError};

/// ASCII digits only; `\d` would also admit digits from other scripts.
static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^[0-9]{{{}}}$", PHONE_DIGITS)).expect("phone pattern is a valid regex")
});

/// Contact domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Contact {
    /// Store-generated identifier
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "John Doe")]
    pub name: String,
    /// Nine digits, kept as text
    #[schema(example = "012345678")]
    pub phone: String,
    #[schema(example = "john.doe@example.com")]
    pub email: String,
    /// Identity of the owning user
    #[schema(example = "u1")]
    pub owner_user_id: String,
    /// Row version, bumped on every update
    #[schema(example = 1)]
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Contact form as submitted by a client (create and edit).
///
/// Kept verbatim so a rejected submission can be handed back for redisplay.
/// `owner_user_id` is accepted but never trusted: ownership always comes
/// from the resolved caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ContactInput {
    /// Required on edit, must match the id in the path
    #[serde(default, deserialize_with = "blank_as_none")]
    #[schema(example = 1)]
    pub id: Option<i32>,

    #[serde(default)]
    #[validate(length(max = 80, message = "Name cannot exceed 80 characters"))]
    #[schema(example = "John Doe", max_length = 80)]
    pub name: String,

    #[serde(default)]
    #[validate(regex(path = *PHONE_PATTERN, message = "Phone number must be exactly 9 digits."))]
    #[schema(example = "012345678")]
    pub phone: String,

    #[serde(default)]
    #[validate(
        required(message = "Mail is required"),
        email(message = "Invalid Email Address"),
        length(max = 50, message = "E-mail cannot exceed 50 characters")
    )]
    #[schema(example = "john.doe@example.com", max_length = 50)]
    pub email: Option<String>,

    /// Ignored
    #[serde(default)]
    pub owner_user_id: Option<String>,

    /// Version the client last read; enables stale-edit detection
    #[serde(default, deserialize_with = "blank_as_none")]
    #[schema(example = 1)]
    pub version: Option<i32>,
}

/// Optional integer that also accepts a numeric string; an empty form value
/// (`id=`) counts as absent.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i32),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(Raw::Text(text)) => text.trim().parse().map(Some).map_err(de::Error::custom),
    }
}

/// Validated contact fields, ready to be persisted for a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl ContactInput {
    /// Validate the submission.
    ///
    /// # Errors
    /// Returns `AppError::InvalidInput` carrying this input unchanged and
    /// every failed field rule.
    pub fn to_fields(&self) -> AppResult<ContactFields> {
        let mut candidate = self.clone();
        // Blank form values count as missing
        candidate.email = candidate.email.filter(|email| !email.trim().is_empty());

        let mut fields = match candidate.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => FieldError::from_validation(&errors),
        };

        if candidate.name.trim().is_empty() {
            // "required" supersedes any other complaint about the name
            fields.retain(|f| f.field != "name");
            fields.insert(
                0,
                FieldError {
                    field: "name".to_string(),
                    message: "Name is required".to_string(),
                },
            );
        }

        match candidate.email {
            Some(email) if fields.is_empty() => Ok(ContactFields {
                name: candidate.name,
                phone: candidate.phone,
                email,
            }),
            _ => Err(AppError::invalid_input(self.clone(), fields)),
        }
    }
}
