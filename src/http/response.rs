//! Response helpers.
//!
//! API errors carry a JSON body of the shape `{ "message": "..." }` so the
//! client-side page can show them without sniffing content types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Build a JSON error response with the given status.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = serde_json::json!({ "message": message.into() });
    (status, Json(body)).into_response()
}
