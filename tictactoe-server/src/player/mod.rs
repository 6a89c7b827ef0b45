mod codec;
mod player;
mod pump;

pub use codec::{decode_action, encode};
pub use player::{Identity, Outbox, Player, PlayerHandle};
pub use pump::{inbound_loop, outbound_loop};
