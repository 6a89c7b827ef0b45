use tictactoe_core::{GameAction, PlayerId, RoomId, RoomInfo};
use tokio::sync::{mpsc, watch};
use tracing::debug;

use crate::error::RoomClosed;
use crate::player::PlayerHandle;

/// Cloneable address of a running [`Room`](crate::Room).
///
/// Each kind of input has its own channel; the actor drains all three in a
/// single loop. Room state is only readable through published snapshots.
#[derive(Debug, Clone)]
pub struct RoomHandle {
    id: RoomId,
    register: mpsc::Sender<PlayerHandle>,
    unregister: mpsc::Sender<PlayerId>,
    actions: mpsc::Sender<GameAction>,
    snapshot: watch::Receiver<RoomInfo>,
}

impl RoomHandle {
    pub(crate) fn new(
        id: RoomId,
        register: mpsc::Sender<PlayerHandle>,
        unregister: mpsc::Sender<PlayerId>,
        actions: mpsc::Sender<GameAction>,
        snapshot: watch::Receiver<RoomInfo>,
    ) -> Self {
        Self {
            id,
            register,
            unregister,
            actions,
            snapshot,
        }
    }

    pub fn id(&self) -> &RoomId {
        &self.id
    }

    /// Asks the room to seat `player`. The outcome arrives on the player's
    /// notification queue.
    pub async fn join(&self, player: PlayerHandle) -> Result<(), RoomClosed> {
        self.register
            .send(player)
            .await
            .map_err(|_| RoomClosed(self.id.clone()))
    }

    /// Tells the room a player's connection is gone. A closed room has
    /// nothing left to clean up, so that case is only logged.
    pub async fn leave(&self, player_id: PlayerId) {
        if self.unregister.send(player_id).await.is_err() {
            debug!("room {} already closed, skip unregister of {}", self.id, player_id);
        }
    }

    pub async fn submit(&self, action: GameAction) -> Result<(), RoomClosed> {
        self.actions
            .send(action)
            .await
            .map_err(|_| RoomClosed(self.id.clone()))
    }

    /// Latest state published by the actor.
    pub fn snapshot(&self) -> RoomInfo {
        self.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<RoomInfo> {
        self.snapshot.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.actions.is_closed()
    }
}
