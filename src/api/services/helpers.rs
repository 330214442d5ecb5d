//! JSON response helpers for the operator API

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::errors::ImsakiaError;

/// Envelope every operator API response uses. `code` is 0 on success and the
/// HTTP status on failure.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    pub data: Option<T>,
}

pub fn json_response<T: Serialize>(
    status: StatusCode,
    code: i32,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse {
            code,
            message: message.into(),
            data,
        })
}

pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, 0, "OK", Some(data))
}

pub fn error_response(status: StatusCode, message: &str) -> HttpResponse {
    json_response::<()>(status, i32::from(status.as_u16()), message, None)
}

/// Map an [`ImsakiaError`] onto the envelope with its HTTP status.
pub fn error_from_imsakia(err: &ImsakiaError) -> HttpResponse {
    error_response(err.http_status(), err.message())
}

/// Unified Result -> HttpResponse conversion for handlers.
pub fn api_result<T, E>(result: Result<T, E>) -> HttpResponse
where
    T: Serialize,
    E: Into<ImsakiaError>,
{
    match result {
        Ok(data) => success_response(data),
        Err(e) => {
            let err: ImsakiaError = e.into();
            error_from_imsakia(&err)
        }
    }
}
