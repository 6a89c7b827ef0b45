use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ServerError;

/// JSON envelope shared by every HTTP endpoint:
/// `{"success": bool, "data"?, "error"?, "message"?, "ts": unix_seconds}`.
#[derive(Debug, Serialize)]
pub struct ResponseBody<T> {
    #[serde(skip)]
    status: StatusCode,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub ts: u64,
}

impl<T: Serialize> ResponseBody<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            success: true,
            data: Some(data),
            error: None,
            message: None,
            ts: unix_now(),
        }
    }
}

impl ResponseBody<()> {
    pub fn failure(err: &ServerError) -> Self {
        Self {
            status: err.status(),
            success: false,
            data: None,
            error: Some(err.code()),
            message: Some(err.to_string()),
            ts: unix_now(),
        }
    }
}

impl<T: Serialize> IntoResponse for ResponseBody<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}
