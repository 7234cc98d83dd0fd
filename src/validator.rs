use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use spts_core::AppError;

fn format_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| match &error.message {
                Some(msg) => msg.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}

fn rejection_message(rejection: &JsonRejection) -> String {
    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return "Missing 'Content-Type: application/json' header".to_string();
    }

    let body = rejection.body_text();
    if let Some(field) = body
        .split("missing field `")
        .nth(1)
        .and_then(|rest| rest.split('`').next())
    {
        return format!("{} is required", field);
    }
    if body.contains("invalid type") || body.contains("unknown variant") {
        return "Invalid field type in request".to_string();
    }

    "Invalid request body".to_string()
}

/// JSON body extractor that also runs `validator` rules.
///
/// Unparseable bodies and missing fields are 400. Rule violations use
/// `REJECT`, which is 422 unless the route picks another status.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T, const REJECT: u16 = 422>(pub T);

/// [`ValidatedJson`] whose rule violations are plain 400s.
pub type BadRequestJson<T> = ValidatedJson<T, 400>;

impl<T, S, const REJECT: u16> FromRequest<S> for ValidatedJson<T, REJECT>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                AppError::new(StatusCode::BAD_REQUEST, anyhow!(rejection_message(&rejection)))
            })?;

        value.validate().map_err(|errors| {
            let status =
                StatusCode::from_u16(REJECT).unwrap_or(StatusCode::UNPROCESSABLE_ENTITY);
            AppError::new(status, anyhow!("{}", format_errors(&errors)))
        })?;

        Ok(ValidatedJson(value))
    }
}
