use crate::model::action::Position;
use crate::model::player::PlayerInfo;
use crate::model::room::RoomInfo;
use serde::{Deserialize, Serialize};

/// Out-of-band messages from a room to a single player.
///
/// Serialized as `{"message_type": "...", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "message_type", content = "data", rename_all = "snake_case")]
pub enum RoomNotification {
    /// Sent to every seated player whenever someone joins. `player` is the
    /// recipient's own view.
    GameInfo { room: RoomInfo, player: PlayerInfo },

    /// The room had no free seat for the recipient.
    RoomFull { room: RoomInfo },

    /// The recipient's last move was refused and nothing changed.
    MoveRejected { reason: String, position: Position },
}
