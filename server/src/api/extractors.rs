//! Validation extractors for API routes
//!
//! All rejection paths funnel into [`ApiError`] so parse failures and
//! constraint violations share the error JSON shape of every other 4xx.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use validator::Validate;

use super::types::ApiError;
use crate::core::constants::MAX_ID_LENGTH;

/// Validate opaque string ids (device ids, fingerprints)
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && id.len() <= MAX_ID_LENGTH
}

#[derive(Debug, Deserialize)]
struct DevicePathRaw {
    device_id: String,
}

/// Path extractor for `/{device_id}` routes that rejects empty or oversized
/// ids with a 400 before the handler runs.
#[derive(Debug)]
pub struct DevicePath {
    pub device_id: String,
}

impl<S> FromRequestParts<S> for DevicePath
where
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<DevicePathRaw>::from_request_parts(parts, state)
            .await
            .map_err(ValidationRejection::Path)?;

        if !is_valid_id(&raw.device_id) {
            return Err(ValidationRejection::InvalidDeviceId);
        }

        Ok(Self {
            device_id: raw.device_id,
        })
    }
}

/// Rejection for the validating extractors
pub enum ValidationRejection {
    Path(PathRejection),
    InvalidDeviceId,
    Query(QueryRejection),
    Json(JsonRejection),
    Validation(validator::ValidationErrors),
}

impl IntoResponse for ValidationRejection {
    fn into_response(self) -> Response {
        let error = match self {
            Self::Path(rejection) => {
                ApiError::bad_request("PATH_PARSE_ERROR", rejection.body_text())
            }
            Self::InvalidDeviceId => ApiError::bad_request(
                "INVALID_DEVICE_ID",
                format!("device_id must be 1-{} characters", MAX_ID_LENGTH),
            ),
            Self::Query(rejection) => {
                ApiError::bad_request("QUERY_PARSE_ERROR", rejection.body_text())
            }
            Self::Json(rejection) => {
                ApiError::bad_request("JSON_PARSE_ERROR", rejection.body_text())
            }
            Self::Validation(errors) => {
                ApiError::bad_request("VALIDATION_ERROR", flatten_errors(&errors))
            }
        };
        error.into_response()
    }
}

fn flatten_errors(errors: &validator::ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => format!("{}: {}", field, message),
                None => format!("{}: invalid value", field),
            })
        })
        .collect();
    parts.sort();
    parts.join("; ")
}

/// Query extractor that runs `validator` constraints after deserialization
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(ValidationRejection::Query)?;
        value.validate().map_err(ValidationRejection::Validation)?;
        Ok(Self(value))
    }
}

/// JSON body extractor that runs `validator` constraints after deserialization
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ValidationRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidationRejection::Json)?;
        value.validate().map_err(ValidationRejection::Validation)?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_validation_bounds() {
        assert!(!is_valid_id(""));
        assert!(is_valid_id("device-1"));
        assert!(is_valid_id(&"x".repeat(MAX_ID_LENGTH)));
        assert!(!is_valid_id(&"x".repeat(MAX_ID_LENGTH + 1)));
    }

    #[test]
    fn test_flatten_errors_includes_field_names() {
        #[derive(Validate)]
        struct Probe {
            #[validate(length(min = 5, message = "too short"))]
            quote: String,
        }

        let errors = Probe {
            quote: "abc".to_string(),
        }
        .validate()
        .unwrap_err();

        assert_eq!(flatten_errors(&errors), "quote: too short");
    }
}
