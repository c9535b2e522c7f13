//! `ValidatedJson`: a JSON body extractor that also runs `validator` rules.
//!
//! Body problems (not JSON, wrong content type, a missing or mistyped field)
//! are 400. Well-formed bodies that break a field rule are 422 with the
//! rule's message, e.g. "Password must be at least 8 characters".

use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use campusdesk_core::AppError;

/// First message per field, ordered by field name so responses are stable.
fn format_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .filter_map(|(field, errors)| {
            errors.first().map(|error| match &error.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Pulls `name` out of serde's "missing field `name`".
fn missing_field(text: &str) -> Option<&str> {
    text.split("missing field `").nth(1)?.split('`').next()
}

/// Pulls the field path out of axum's "...target type: email: invalid type: ...".
fn mistyped_field(text: &str) -> Option<&str> {
    let (_, rest) = text.split_once("target type: ")?;
    let (path, _) = rest.split_once(": invalid type")?;
    (!path.is_empty() && !path.contains(' ')).then_some(path)
}

fn reject_body(rejection: JsonRejection) -> AppError {
    let text = rejection.body_text();

    let message = match &rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "Missing 'Content-Type: application/json' header".to_string()
        }
        JsonRejection::JsonSyntaxError(_) => "Request body is not valid JSON".to_string(),
        JsonRejection::JsonDataError(_) => {
            if let Some(field) = missing_field(&text) {
                format!("{field} is required")
            } else if text.contains("invalid type") {
                match mistyped_field(&text) {
                    Some(field) => format!("{field} has the wrong type"),
                    None => "A field has the wrong type".to_string(),
                }
            } else {
                "Invalid request body".to_string()
            }
        }
        _ => "Invalid request body".to_string(),
    };

    tracing::debug!(reason = %text, "Rejected request body");
    AppError::bad_request(anyhow!(message))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(reject_body)?;

        value
            .validate()
            .map_err(|errors| AppError::unprocessable(anyhow!(format_errors(&errors))))?;

        Ok(ValidatedJson(value))
    }
}
