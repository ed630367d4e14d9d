//! Form extractor - Accepts a submission as JSON or as an urlencoded form.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// Body extractor for form submissions.
///
/// `application/json` bodies are read as JSON, anything else as
/// `application/x-www-form-urlencoded`. Field validation is left to the
/// service so a rejected submission can be echoed back whole; only an
/// unreadable body is refused here, as `AppError::BadRequest`.
pub struct ContactForm<T>(pub T);

fn is_json(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim_start().starts_with("application/json"))
        .unwrap_or(false)
}

#[async_trait]
impl<S, T> FromRequest<S> for ContactForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(&req) {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::bad_request(e.body_text()))?;
            Ok(ContactForm(value))
        } else {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::bad_request(e.body_text()))?;
            Ok(ContactForm(value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ContactInput;
    use axum::body::Body;

    async fn extract(content_type: &str, body: &str) -> Result<ContactInput, AppError> {
        let request = Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body.to_string()))
            .unwrap();

        ContactForm::<ContactInput>::from_request(request, &())
            .await
            .map(|ContactForm(input)| input)
    }

    #[tokio::test]
    async fn test_reads_json() {
        let input = extract(
            "application/json",
            r#"{"name":"John","phone":"012345678","email":"j@x.com"}"#,
        )
        .await
        .unwrap();

        assert_eq!(input.name, "John");
        assert_eq!(input.phone, "012345678");
        assert_eq!(input.email.as_deref(), Some("j@x.com"));
    }

    #[tokio::test]
    async fn test_reads_urlencoded_form() {
        let input = extract(
            "application/x-www-form-urlencoded",
            "id=4&name=Jane+Doe&phone=000000001&email=jane%40x.com&owner_user_id=u9",
        )
        .await
        .unwrap();

        assert_eq!(input.id, Some(4));
        assert_eq!(input.name, "Jane Doe");
        assert_eq!(input.phone, "000000001");
        assert_eq!(input.email.as_deref(), Some("jane@x.com"));
        assert_eq!(input.owner_user_id.as_deref(), Some("u9"));
    }

    #[tokio::test]
    async fn test_empty_form_numbers_read_as_absent() {
        let input = extract(
            "application/x-www-form-urlencoded",
            "id=&name=Jane&phone=000000001&email=jane%40x.com&version=",
        )
        .await
        .unwrap();

        assert_eq!(input.id, None);
        assert_eq!(input.version, None);
        assert_eq!(input.name, "Jane");
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let result = extract("application/json", "{not json").await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
