//! Path extractor for contact ids.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::errors::AppError;

/// Contact id taken from the `{id}` path segment.
///
/// A missing or non-numeric id names no contact, so it is rejected as
/// `AppError::NotFound` rather than a bad request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for ContactId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound)?;

        raw.trim()
            .parse::<i32>()
            .map(ContactId)
            .map_err(|_| AppError::NotFound)
    }
}
