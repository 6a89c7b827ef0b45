use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::time::Duration;
use thiserror::Error;
use tictactoe_core::RoomId;

use crate::response::ResponseBody;

/// The room actor has exited and no longer accepts messages.
#[derive(Debug, Clone, Error)]
#[error("room {0} is closed")]
pub struct RoomClosed(pub RoomId);

/// Reasons a connection pump stops. All of them are fatal to that connection
/// only.
#[derive(Debug, Error)]
pub enum PumpError {
    #[error("no move received for {0:?}")]
    IdleTimeout(Duration),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed frame: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to encode message: {0}")]
    Encode(#[source] serde_json::Error),

    #[error(transparent)]
    RoomClosed(#[from] RoomClosed),
}

/// Errors surfaced by the HTTP layer.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ServerError::BadRequest(_) => "ERROR_BAD_REQUEST",
            ServerError::NotFound(_) => "ERROR_NOT_FOUND",
            ServerError::Internal(_) => "ERROR_INTERNAL_SERVER",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        ResponseBody::failure(&self).into_response()
    }
}
