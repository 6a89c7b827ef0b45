use axum::extract::ws::Message;
use futures::{Sink, SinkExt, Stream, StreamExt};
use std::fmt::Display;
use std::time::Duration;
use tokio::time::{self, Instant};
use tracing::{debug, info};

use crate::error::PumpError;
use crate::player::codec::{decode_action, encode};
use crate::player::player::{Identity, Outbox};
use crate::room::RoomHandle;

/// Reads frames from the connection and forwards decoded moves to the room.
///
/// Returns `Ok(())` when the peer closes the connection; any transport or
/// decode failure ends the loop with an error. So does `idle_timeout`
/// without a submitted move: pings, pongs and blank frames keep nothing
/// alive.
pub async fn inbound_loop<St, E>(
    mut stream: St,
    identity: Identity,
    room: RoomHandle,
    idle_timeout: Duration,
) -> Result<(), PumpError>
where
    St: Stream<Item = Result<Message, E>> + Unpin,
    E: Display,
{
    let mut deadline = Instant::now() + idle_timeout;

    loop {
        let frame = match time::timeout_at(deadline, stream.next()).await {
            Err(_) => return Err(PumpError::IdleTimeout(idle_timeout)),
            Ok(None) => return Ok(()),
            Ok(Some(Err(e))) => return Err(PumpError::Transport(e.to_string())),
            Ok(Some(Ok(frame))) => frame,
        };

        let payload: &[u8] = match &frame {
            Message::Text(text) => text.as_str().as_bytes(),
            Message::Binary(data) => &data[..],
            Message::Close(reason) => {
                info!("player {} closed the connection: {:?}", identity.id, reason);
                return Ok(());
            }
            Message::Ping(_) | Message::Pong(_) => continue,
        };

        if payload.trim_ascii().is_empty() {
            debug!("player {} sent an empty payload", identity.id);
            continue;
        }

        let mut action = decode_action(payload)?;
        action.stamp(identity.info());
        debug!(
            "player [{}:{}] submits {:?} at {:?}",
            identity.id, identity.name, action.action_type, action.data.position
        );

        room.submit(action).await?;
        deadline = Instant::now() + idle_timeout;
    }
}

/// Writes everything the room queues for this player, one frame per message.
///
/// When the room drops its end of either queue, whatever is still buffered
/// in the other queue is flushed and a close frame is sent.
pub async fn outbound_loop<Si>(mut sink: Si, mut outbox: Outbox) -> Result<(), PumpError>
where
    Si: Sink<Message> + Unpin,
    Si::Error: Display,
{
    loop {
        let frame = tokio::select! {
            action = outbox.actions.recv() => match action {
                Some(action) => encode(&action)?,
                None => break,
            },
            notification = outbox.notifications.recv() => match notification {
                Some(notification) => encode(&notification)?,
                None => break,
            },
        };

        sink.send(frame)
            .await
            .map_err(|e| PumpError::Transport(e.to_string()))?;
    }

    while let Ok(action) = outbox.actions.try_recv() {
        sink.send(encode(&action)?)
            .await
            .map_err(|e| PumpError::Transport(e.to_string()))?;
    }
    while let Ok(notification) = outbox.notifications.try_recv() {
        sink.send(encode(&notification)?)
            .await
            .map_err(|e| PumpError::Transport(e.to_string()))?;
    }

    sink.send(Message::Close(None))
        .await
        .map_err(|e| PumpError::Transport(e.to_string()))
}
