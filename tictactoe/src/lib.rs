pub use tictactoe_core::{Board, GameAction, GameStatus, PlayerId, RoomId, Side};

pub mod model {
    pub use tictactoe_core::*;
}

#[cfg(feature = "server")]
pub mod server {
    pub use tictactoe_server::*;
}
