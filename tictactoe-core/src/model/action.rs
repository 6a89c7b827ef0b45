use crate::board::{Board, GameStatus};
use crate::model::player::PlayerInfo;
use crate::model::side::{Cell, Side};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Init,
    Move,
    End,
}

/// Zero-based board coordinate. Signed so that a negative coordinate from a
/// client is rejected as off the board instead of failing to decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i64,
    pub col: i64,
}

impl Position {
    pub fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }
}

/// Payload of a [`GameAction`].
///
/// Every field has a default so a client can send `{"position": {...}}` alone.
/// Only `position` comes from the client. `side` and `actor` are overwritten
/// by the connection pump and `board` and `status` by the room, so a bad
/// value in any of them decodes as the default instead of failing the frame.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionData {
    #[serde(deserialize_with = "side_or_blank")]
    pub side: Option<Side>,
    pub position: Position,
    #[serde(deserialize_with = "or_default")]
    pub board: Board,
    #[serde(deserialize_with = "or_default")]
    pub status: GameStatus,
    #[serde(deserialize_with = "or_default")]
    pub actor: Option<PlayerInfo>,
}

/// `"X"` and `"O"` are sides; `""`, `null` and anything else are none.
fn side_or_blank<'de, D>(deserializer: D) -> Result<Option<Side>, D::Error>
where
    D: Deserializer<'de>,
{
    let cell: Option<Cell> = or_default(deserializer)?;
    Ok(cell.and_then(Cell::side))
}

/// Decodes `T`, or falls back to `T::default()` when the value has the wrong
/// shape. The value still has to be well-formed JSON.
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameAction {
    pub action_type: ActionType,
    #[serde(default)]
    pub data: ActionData,
}

impl GameAction {
    pub fn new(action_type: ActionType, data: ActionData) -> Self {
        Self { action_type, data }
    }

    /// A move request as a client would send it.
    pub fn play(position: Position) -> Self {
        Self::new(
            ActionType::Move,
            ActionData {
                position,
                ..ActionData::default()
            },
        )
    }

    /// Game start: empty board, X to move.
    pub fn init() -> Self {
        Self::new(
            ActionType::Init,
            ActionData {
                side: Some(Side::X),
                ..ActionData::default()
            },
        )
    }

    /// Game end caused by `leaver` dropping out; the other side wins.
    pub fn forfeit(board: Board, leaver: PlayerInfo) -> Self {
        let status = leaver
            .side
            .map(|side| GameStatus::win_for(side.opponent()))
            .unwrap_or_default();

        Self::new(
            ActionType::End,
            ActionData {
                side: leaver.side,
                position: Position::default(),
                board,
                status,
                actor: Some(leaver),
            },
        )
    }

    /// Overwrites the untrusted identity fields with server-known values.
    pub fn stamp(&mut self, actor: PlayerInfo) {
        self.data.side = actor.side;
        self.data.actor = Some(actor);
    }
}
