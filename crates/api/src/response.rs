//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Use [`DataResponse`]
//! instead of ad-hoc `serde_json::json!({ "data": ... })` to get
//! compile-time type safety and consistent serialization.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;

use friday_core::Outcome;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Map an authorization outcome onto the wire.
///
/// `Ok` becomes `status` with a [`DataResponse`] body; `NotFound` is 404 and
/// `Unauthorized` is 401, each with the standard error body. The 401 body is
/// identical for every denial cause.
pub fn outcome_response<T: Serialize>(status: StatusCode, outcome: Outcome<T>) -> Response {
    match outcome {
        Outcome::Ok(data) => (status, axum::Json(DataResponse { data })).into_response(),
        Outcome::NotFound => (
            StatusCode::NOT_FOUND,
            axum::Json(json!({
                "error": "Resource not found",
                "code": "NOT_FOUND",
            })),
        )
            .into_response(),
        Outcome::Unauthorized => (
            StatusCode::UNAUTHORIZED,
            axum::Json(json!({
                "error": "Unauthorized",
                "code": "UNAUTHORIZED",
            })),
        )
            .into_response(),
    }
}
