use crate::model::Side;
use thiserror::Error;

/// Why a move was refused by the room.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("position ({row}, {col}) is outside the board")]
    OutOfBounds { row: i64, col: i64 },

    #[error("cell ({row}, {col}) is already taken")]
    Occupied { row: i64, col: i64 },

    #[error("it is {expected}'s turn")]
    NotYourTurn { expected: Side },

    #[error("the game is not in progress")]
    GameNotActive,

    #[error("player is not seated in this room")]
    NotSeated,
}
