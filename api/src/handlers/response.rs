//! Envelope builders.
//!
//! Pure constructors wrapping payloads into the uniform
//! `{success, message, data | errors}` shape.

use actix_web::{http::StatusCode, HttpResponse};
use serde::Serialize;
use tm_shared::types::response::{ApiResponse, FieldErrors};

/// `200 OK` with `{success: true, message, data}`
pub fn success<T: Serialize>(data: T, message: Option<String>) -> HttpResponse {
    success_with_status(data, message, StatusCode::OK)
}

/// Success envelope with a caller-chosen status
pub fn success_with_status<T: Serialize>(data: T, message: Option<String>, status: StatusCode) -> HttpResponse {
    HttpResponse::build(status).json(ApiResponse::success(data, message))
}

/// `201 Created` success envelope
pub fn created<T: Serialize>(data: T, message: Option<String>) -> HttpResponse {
    success_with_status(data, message, StatusCode::CREATED)
}

/// `{success: false, message}`, plus `errors` only when a map is supplied
pub fn error(message: impl Into<String>, status: StatusCode, errors: Option<FieldErrors>) -> HttpResponse {
    HttpResponse::build(status).json(ApiResponse::error(message, errors))
}

/// `422` with the fixed "Validation error" message and the field map
pub fn validation_error(errors: FieldErrors) -> HttpResponse {
    HttpResponse::build(StatusCode::UNPROCESSABLE_ENTITY).json(ApiResponse::validation_error(errors))
}
