use axum::extract::State;
use serde::Serialize;
use tictactoe_core::RoomInfo;
use tracing::info;

use crate::response::ResponseBody;
use crate::routes::AppState;

#[derive(Debug, Serialize)]
pub struct CreateRoomResponse {
    pub room: RoomInfo,
}

#[derive(Debug, Serialize)]
pub struct RoomListResponse {
    pub rooms: Vec<RoomInfo>,
    pub count: usize,
}

/// `POST /room`
pub async fn create_room(State(state): State<AppState>) -> ResponseBody<CreateRoomResponse> {
    let room = state.rooms.create_room();
    info!("created game room {}", room.id());

    ResponseBody::success(CreateRoomResponse {
        room: room.snapshot(),
    })
}

/// `GET /room`, a debug listing of every live room.
pub async fn list_rooms(State(state): State<AppState>) -> ResponseBody<RoomListResponse> {
    let rooms = state.rooms.list_rooms();

    ResponseBody::success(RoomListResponse {
        count: rooms.len(),
        rooms,
    })
}
