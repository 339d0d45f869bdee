// --- File: crates/groupslot_common/src/http.rs ---
use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{GroupslotError, HttpStatusCode};

/// Header carrying the caller identity established by the upstream auth layer.
pub const CALLER_HEADER: &str = "x-groupslot-user";

/// Extension trait for GroupslotError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for GroupslotError {
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut error = json!({
            "message": self.to_string(),
            "code": status_code.as_u16(),
        });
        if let Some(field) = self.field() {
            error["field"] = json!(field);
        }

        (status_code, Json(json!({ "error": error }))).into_response()
    }
}

impl IntoResponse for GroupslotError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}

/// Reads the caller identity header; absent or blank means unauthenticated.
pub fn caller_from_headers(headers: &HeaderMap) -> Result<String, GroupslotError> {
    headers
        .get(CALLER_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or_else(|| GroupslotError::Unauthenticated("missing caller identity".to_string()))
}
