use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tictactoe_core::RoomId;
use tracing::{error, info};

use crate::error::ServerError;
use crate::routes::AppState;

/// `GET /room/{id}`: the game page, or the not-found page for unknown rooms.
pub async fn room_page(Path(id): Path<String>, State(state): State<AppState>) -> Response {
    let room_id = RoomId::from(id);
    if state.rooms.get_room(&room_id).is_some() {
        info!("accessing game room {}", room_id);
        scene(&state, "room.html", StatusCode::OK).await
    } else {
        info!("game room {} not found", room_id);
        scene(&state, "404.html", StatusCode::NOT_FOUND).await
    }
}

async fn scene(state: &AppState, name: &str, status: StatusCode) -> Response {
    let path = state.config.scenes_dir.join(name);
    match tokio::fs::read_to_string(&path).await {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            error!("failed to read scene {}: {}", path.display(), e);
            ServerError::Internal(format!("scene {name} is unavailable")).into_response()
        }
    }
}
