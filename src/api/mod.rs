pub mod files;
pub mod search;
pub mod server;

use axum::{http::StatusCode, Json};
use serde_json::{json, Value};

/// Handler error: status code plus `{"error": ...}` body / 接口错误
pub type ApiError = (StatusCode, Json<Value>);

pub fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "error": message.into() })))
}
