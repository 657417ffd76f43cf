//! JSON body extractor that runs `validator` rules before the handler.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::{Validate, ValidationErrors};

use luxedrive_core::error::AppError;

use crate::error::ApiError;

/// A deserialized and validated JSON body.
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_error)?;
        value.validate().map_err(validation_error)?;
        Ok(Self(value))
    }
}

fn rejection_error(rejection: JsonRejection) -> AppError {
    AppError::validation(rejection.body_text())
}

/// Field errors as `{"field": ["message", ...]}` under `fields`; the first
/// message becomes the error text.
fn validation_error(errors: ValidationErrors) -> AppError {
    let mut fields: Vec<(String, Vec<String>)> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("Invalid value ({})", e.code),
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let headline = fields
        .first()
        .and_then(|(field, messages)| messages.first().map(|m| format!("{field}: {m}")))
        .unwrap_or_else(|| "Invalid request body".to_string());

    let details: Map<String, Value> = fields
        .into_iter()
        .map(|(field, messages)| (field, Value::from(messages)))
        .collect();

    AppError::validation(headline).with_details(serde_json::json!({ "fields": details }))
}
