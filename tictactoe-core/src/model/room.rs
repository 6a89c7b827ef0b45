use crate::board::Board;
use crate::model::player::PlayerInfo;
use crate::model::side::Side;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque room identifier such as `room-brave-otter`.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl From<&str> for RoomId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for RoomId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Waiting,
    Active,
    Finished,
}

/// Point-in-time snapshot of a room. Only the room actor produces these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomInfo {
    pub id: RoomId,
    pub players: [Option<PlayerInfo>; 2],
    pub board: Board,
    pub current_turn: Side,
    pub status: RoomStatus,
}

impl RoomInfo {
    /// A freshly created room: no players, empty board, X to move.
    pub fn waiting(id: RoomId) -> Self {
        Self {
            id,
            players: [None, None],
            board: Board::default(),
            current_turn: Side::X,
            status: RoomStatus::Waiting,
        }
    }

    pub fn is_full(&self) -> bool {
        self.players.iter().all(Option::is_some)
    }
}
