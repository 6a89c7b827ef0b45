use axum::extract::ws::WebSocket;
use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::extract::{Path, State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::StreamExt;
use tictactoe_core::RoomId;
use tracing::{info, warn};

use crate::config::PumpConfig;
use crate::error::ServerError;
use crate::names;
use crate::player::Player;
use crate::room::RoomHandle;
use crate::routes::AppState;

/// `GET /room/{id}/socket`. Unknown rooms are a 404 and requests that are
/// not a WebSocket handshake a 400, both in the JSON envelope.
pub async fn ws_handler(
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServerError> {
    let room_id = RoomId::from(id);
    let room = state
        .rooms
        .get_room(&room_id)
        .ok_or_else(|| ServerError::NotFound(format!("game room {room_id} not found")))?;
    let ws = ws.map_err(|rejection| ServerError::BadRequest(rejection.body_text()))?;

    let pump = state.config.pump.clone();
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, room, pump)))
}

async fn handle_socket(socket: WebSocket, room: RoomHandle, config: PumpConfig) {
    let (player, handle) = Player::new(names::display_name(), config.outbox_capacity);
    info!(
        "New WebSocket connection: player {} for room {}",
        player.id(),
        room.id()
    );

    if let Err(e) = room.join(handle).await {
        warn!("player {} could not join: {}", player.id(), e);
        return;
    }

    let (sender, receiver) = socket.split();
    player
        .run(sender, receiver, room, config.idle_timeout)
        .await;
}
