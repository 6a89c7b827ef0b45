use axum::extract::ws::Message;
use serde::Serialize;
use tictactoe_core::GameAction;

use crate::error::PumpError;

pub fn decode_action(payload: &[u8]) -> Result<GameAction, PumpError> {
    serde_json::from_slice(payload).map_err(PumpError::Decode)
}

/// One outbound message becomes exactly one text frame.
pub fn encode<T: Serialize>(message: &T) -> Result<Message, PumpError> {
    let json = serde_json::to_string(message).map_err(PumpError::Encode)?;
    Ok(Message::Text(json.into()))
}
