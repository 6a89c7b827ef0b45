mod action;
mod notification;
mod player;
mod room;
mod side;

pub use action::{ActionData, ActionType, GameAction, Position};
pub use notification::RoomNotification;
pub use player::{PlayerId, PlayerInfo};
pub use room::{RoomId, RoomInfo, RoomStatus};
pub use side::{Cell, Side};
