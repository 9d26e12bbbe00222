//! Request extraction helpers
//!
//! Handlers take axum extractors as `Result<_, Rejection>` and pass them
//! through these helpers, so malformed paths, queries and bodies answer with
//! the same JSON error body as every other failure.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Json, Path, Query};
use proofmint_core::Address;
use serde_json::Value;

use crate::error::ApiError;

pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    result
        .map(|Json(value)| value)
        .map_err(|err| ApiError::BadRequest(err.body_text()))
}

pub fn extract_path<T>(result: Result<Path<T>, PathRejection>) -> Result<T, ApiError> {
    result
        .map(|Path(value)| value)
        .map_err(|err| ApiError::BadRequest(err.body_text()))
}

pub fn extract_query<T>(result: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    result
        .map(|Query(value)| value)
        .map_err(|err| ApiError::BadRequest(err.body_text()))
}

/// Read an address field from an unvalidated body, if it is present and parses
pub fn address_field(body: &Option<Json<Value>>, field: &str) -> Option<Address> {
    body.as_ref()?
        .get(field)?
        .as_str()?
        .parse()
        .ok()
}
