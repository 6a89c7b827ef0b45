use axum::extract::ws::Message;
use futures::{Sink, Stream};
use std::fmt::Display;
use std::time::Duration;
use tictactoe_core::{GameAction, PlayerId, PlayerInfo, RoomNotification, Side};
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

use crate::player::pump::{inbound_loop, outbound_loop};
use crate::room::RoomHandle;

/// Who a connection belongs to. The side becomes visible once the room seats
/// the player and never changes afterwards.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: PlayerId,
    pub name: String,
    side: watch::Receiver<Option<Side>>,
}

impl Identity {
    pub fn side(&self) -> Option<Side> {
        *self.side.borrow()
    }

    /// Snapshot used to stamp inbound actions.
    pub fn info(&self) -> PlayerInfo {
        PlayerInfo {
            id: self.id,
            name: self.name.clone(),
            side: self.side(),
        }
    }
}

/// The two queues a room writes into for one player.
#[derive(Debug)]
pub struct Outbox {
    pub actions: mpsc::Receiver<GameAction>,
    pub notifications: mpsc::Receiver<RoomNotification>,
}

/// Connection-side half of a player. Owns the receiving ends of the outbound
/// queues and, once running, the physical connection.
#[derive(Debug)]
pub struct Player {
    identity: Identity,
    outbox: Outbox,
}

/// Room-side half of a player: a non-owning way to reach its queues.
///
/// Dropping the handle closes both queues, which makes the outbound loop send
/// a close frame.
#[derive(Debug)]
pub struct PlayerHandle {
    info: PlayerInfo,
    actions: mpsc::Sender<GameAction>,
    notifications: mpsc::Sender<RoomNotification>,
    side: watch::Sender<Option<Side>>,
}

impl Player {
    pub fn new(name: impl Into<String>, capacity: usize) -> (Player, PlayerHandle) {
        let id = PlayerId::new();
        let name = name.into();
        let (actions_tx, actions_rx) = mpsc::channel(capacity);
        let (notifications_tx, notifications_rx) = mpsc::channel(capacity);
        let (side_tx, side_rx) = watch::channel(None);

        let player = Player {
            identity: Identity {
                id,
                name: name.clone(),
                side: side_rx,
            },
            outbox: Outbox {
                actions: actions_rx,
                notifications: notifications_rx,
            },
        };

        let handle = PlayerHandle {
            info: PlayerInfo::new(id, name),
            actions: actions_tx,
            notifications: notifications_tx,
            side: side_tx,
        };

        (player, handle)
    }

    pub fn id(&self) -> PlayerId {
        self.identity.id
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn into_parts(self) -> (Identity, Outbox) {
        (self.identity, self.outbox)
    }

    /// Pumps frames between a connection and `room` until either direction
    /// stops, then tells the room the player is gone.
    ///
    /// The connection is passed as its two split halves; both are dropped
    /// exactly once when this returns.
    pub async fn run<Si, St, E>(self, sink: Si, stream: St, room: RoomHandle, idle_timeout: Duration)
    where
        Si: Sink<Message> + Unpin + Send + 'static,
        Si::Error: Display + Send,
        St: Stream<Item = Result<Message, E>> + Unpin + Send + 'static,
        E: Display + Send + 'static,
    {
        let (identity, outbox) = self.into_parts();
        let player_id = identity.id;
        info!(
            "player [{}:{}] connected to room {}",
            player_id,
            identity.name,
            room.id()
        );

        let mut send_task = tokio::spawn(outbound_loop(sink, outbox));
        let mut recv_task = tokio::spawn(inbound_loop(stream, identity, room.clone(), idle_timeout));

        let outcome = tokio::select! {
            res = &mut send_task => {
                recv_task.abort();
                ("outbound", res)
            }
            res = &mut recv_task => {
                send_task.abort();
                ("inbound", res)
            }
        };

        match outcome {
            (direction, Ok(Ok(()))) => debug!("player {} {} loop finished", player_id, direction),
            (direction, Ok(Err(e))) => warn!("player {} {} loop failed: {}", player_id, direction, e),
            (direction, Err(e)) => error!("player {} {} task died: {}", player_id, direction, e),
        }

        room.leave(player_id).await;
        info!("player {} disconnected from room {}", player_id, room.id());
    }
}

impl PlayerHandle {
    pub fn id(&self) -> PlayerId {
        self.info.id
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn info(&self) -> PlayerInfo {
        self.info.clone()
    }

    /// Records the side chosen by the room and makes it visible to the pump.
    pub(crate) fn seat(&mut self, side: Side) {
        debug_assert!(self.info.side.is_none(), "player sides are assigned once");
        self.info.side = Some(side);
        self.side.send_replace(Some(side));
    }

    pub async fn send_action(&self, action: GameAction, timeout: Duration) {
        if let Err(e) = self.actions.send_timeout(action, timeout).await {
            warn!("dropping action for player {}: {}", self.info.id, e);
        }
    }

    pub async fn notify(&self, notification: RoomNotification, timeout: Duration) {
        if let Err(e) = self.notifications.send_timeout(notification, timeout).await {
            warn!("dropping notification for player {}: {}", self.info.id, e);
        }
    }
}
