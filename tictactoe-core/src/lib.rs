pub mod board;
pub mod error;
pub mod model;

pub use board::{BOARD_SIZE, Board, GameStatus};
pub use error::MoveError;
pub use model::*;
