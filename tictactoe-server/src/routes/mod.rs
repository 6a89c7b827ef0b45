mod pages;
mod rooms;
mod ws_handler;

pub use pages::room_page;
pub use rooms::{CreateRoomResponse, RoomListResponse, create_room, list_rooms};
pub use ws_handler::ws_handler;

use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::room::RoomManager;

#[derive(Clone)]
pub struct AppState {
    pub rooms: RoomManager,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            rooms: RoomManager::new(config.room.clone()),
            config: Arc::new(config),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let main_menu = ServeFile::new(state.config.scenes_dir.join("index.html"));

    Router::new()
        .route_service("/", main_menu)
        .route("/room", get(list_rooms).post(create_room))
        .route("/room/{id}", get(room_page))
        .route("/room/{id}/socket", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
