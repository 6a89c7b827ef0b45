use crate::config::RoomConfig;
use crate::player::PlayerHandle;
use crate::room::RoomHandle;
use tictactoe_core::{
    ActionType, Board, GameAction, MoveError, PlayerId, PlayerInfo, Position, RoomId, RoomInfo,
    RoomNotification, RoomStatus, Side,
};
use tokio::sync::{mpsc, watch};
use tokio::time::{self, Instant};
use tracing::{debug, info, warn};

/// One game. The actor is the only writer of `board`, `turn` and `status`;
/// everything else talks to it through a [`RoomHandle`].
pub struct Room {
    id: RoomId,
    players: [Option<PlayerHandle>; 2],
    board: Board,
    turn: Side,
    status: RoomStatus,
    register_rx: mpsc::Receiver<PlayerHandle>,
    unregister_rx: mpsc::Receiver<PlayerId>,
    action_rx: mpsc::Receiver<GameAction>,
    snapshot_tx: watch::Sender<RoomInfo>,
    /// When an empty waiting room gives up.
    expires_at: Instant,
    config: RoomConfig,
}

impl Room {
    pub fn new(id: RoomId, config: RoomConfig) -> (Self, RoomHandle) {
        let (register_tx, register_rx) = mpsc::channel(config.inbox_capacity);
        let (unregister_tx, unregister_rx) = mpsc::channel(config.inbox_capacity);
        let (action_tx, action_rx) = mpsc::channel(config.inbox_capacity);
        let (snapshot_tx, snapshot_rx) = watch::channel(RoomInfo::waiting(id.clone()));

        let handle = RoomHandle::new(
            id.clone(),
            register_tx,
            unregister_tx,
            action_tx,
            snapshot_rx,
        );

        let room = Self {
            id,
            players: [None, None],
            board: Board::new(),
            turn: Side::X,
            status: RoomStatus::Waiting,
            register_rx,
            unregister_rx,
            action_rx,
            snapshot_tx,
            expires_at: Instant::now() + config.waiting_ttl,
            config,
        };

        (room, handle)
    }

    /// Processes one message at a time until the game finishes, every handle
    /// is gone, or the room sat empty for `waiting_ttl`. On exit both player
    /// handles are dropped, which closes their outbound queues.
    pub async fn run(mut self) {
        info!("Room {} is waiting for players", self.id);

        loop {
            tokio::select! {
                Some(player) = self.register_rx.recv() => self.handle_join(player).await,
                Some(player_id) = self.unregister_rx.recv() => self.handle_leave(player_id).await,
                Some(action) = self.action_rx.recv() => self.handle_action(action).await,
                _ = time::sleep_until(self.expires_at), if self.is_empty() => {
                    info!("Room {} expired without players", self.id);
                    self.status = RoomStatus::Finished;
                    self.publish();
                }
                else => {
                    info!("All channels of room {} closed", self.id);
                    break;
                }
            }

            if self.status == RoomStatus::Finished {
                break;
            }
        }

        self.players = [None, None];
        info!("Room {} event loop finished", self.id);
    }

    async fn handle_join(&mut self, mut player: PlayerHandle) {
        info!(
            "player [{}:{}] joining room {}",
            player.id(),
            player.name(),
            self.id
        );

        let open_slot = match self.status {
            RoomStatus::Waiting => self.players.iter().position(Option::is_none),
            RoomStatus::Active | RoomStatus::Finished => None,
        };

        let Some(slot) = open_slot else {
            warn!(
                "player [{}:{}] wants to join room {}, turns out it's full",
                player.id(),
                player.name(),
                self.id
            );
            let room = self.snapshot();
            player
                .notify(RoomNotification::RoomFull { room }, self.config.broadcast_timeout)
                .await;
            return;
        };

        let side = Side::ALL[slot];
        player.seat(side);
        info!(
            "player [{}:{}] joined room {} as {}",
            player.id(),
            player.name(),
            self.id,
            side
        );
        self.players[slot] = Some(player);
        self.publish();

        let room = self.snapshot();
        for player in self.players.iter().flatten() {
            let info = RoomNotification::GameInfo {
                room: room.clone(),
                player: player.info(),
            };
            player.notify(info, self.config.broadcast_timeout).await;
        }

        if self.players.iter().all(Option::is_some) {
            self.start_game().await;
        }
    }

    async fn start_game(&mut self) {
        info!("Room {} is full, starting game", self.id);

        self.status = RoomStatus::Active;
        self.turn = Side::X;
        self.board = Board::new();
        self.publish();

        time::sleep(self.config.settle_delay).await;
        self.broadcast(GameAction::init()).await;
    }

    async fn handle_leave(&mut self, player_id: PlayerId) {
        let Some(leaver) = self
            .slot_of(player_id)
            .and_then(|slot| self.players[slot].take())
        else {
            debug!("ignoring unregister of unseated player {} in room {}", player_id, self.id);
            return;
        };

        info!(
            "player [{}:{}] left room {}",
            leaver.id(),
            leaver.name(),
            self.id
        );

        match self.status {
            RoomStatus::Waiting => {
                if self.is_empty() {
                    self.expires_at = Instant::now() + self.config.waiting_ttl;
                }
                self.publish();
            }
            RoomStatus::Active => {
                self.status = RoomStatus::Finished;
                self.publish();

                let end = GameAction::forfeit(self.board, leaver.info());
                info!("Room {} finished by forfeit: {:?}", self.id, end.data.status);
                self.broadcast(end).await;
            }
            RoomStatus::Finished => {}
        }
    }

    async fn handle_action(&mut self, mut action: GameAction) {
        if action.action_type != ActionType::Move {
            warn!(
                "dropping client-sent {:?} action in room {}",
                action.action_type, self.id
            );
            return;
        }

        let Some(actor) = action.data.actor.clone() else {
            warn!("dropping unstamped action in room {}", self.id);
            return;
        };
        let position = action.data.position;

        let side = match self.check_move(&actor, position) {
            Ok(side) => side,
            Err(e) => {
                self.reject(actor.id, position, e).await;
                return;
            }
        };

        self.board = self.board.apply_move(position, side);
        let status = self.board.evaluate();
        self.turn = side.opponent();
        debug!("room {} board now {:?}", self.id, self.board);

        action.data.side = Some(side);
        action.data.board = self.board;
        action.data.status = status;

        if status.is_terminal() {
            action.action_type = ActionType::End;
            self.status = RoomStatus::Finished;
            match status.winner() {
                Some(winner) => info!("Room {} finished, {} wins", self.id, winner),
                None => info!("Room {} finished in a draw", self.id),
            }
        }

        self.publish();
        self.broadcast(action).await;
    }

    /// Side the move is played for, if the move is legal right now.
    fn check_move(&self, actor: &PlayerInfo, position: Position) -> Result<Side, MoveError> {
        if self.status != RoomStatus::Active {
            return Err(MoveError::GameNotActive);
        }

        let side = self
            .slot_of(actor.id)
            .map(|slot| Side::ALL[slot])
            .ok_or(MoveError::NotSeated)?;
        if actor.side != Some(side) {
            return Err(MoveError::NotSeated);
        }

        if self.turn != side {
            return Err(MoveError::NotYourTurn {
                expected: self.turn,
            });
        }

        self.board.check_move(position)?;
        Ok(side)
    }

    async fn reject(&self, player_id: PlayerId, position: Position, error: MoveError) {
        warn!(
            "rejected move of player {} at {:?} in room {}: {}",
            player_id, position, self.id, error
        );

        let Some(player) = self
            .slot_of(player_id)
            .and_then(|slot| self.players[slot].as_ref())
        else {
            return;
        };

        let notification = RoomNotification::MoveRejected {
            reason: error.to_string(),
            position,
        };
        player
            .notify(notification, self.config.broadcast_timeout)
            .await;
    }

    /// Sends `action` to every seated player in slot order.
    async fn broadcast(&self, action: GameAction) {
        debug!(
            "broadcast {:?} to all players in room {}",
            action.action_type, self.id
        );

        for player in self.players.iter().flatten() {
            player
                .send_action(action.clone(), self.config.broadcast_timeout)
                .await;
        }
    }

    /// Waiting with both seats free.
    fn is_empty(&self) -> bool {
        self.status == RoomStatus::Waiting && self.players.iter().all(Option::is_none)
    }

    fn slot_of(&self, player_id: PlayerId) -> Option<usize> {
        self.players
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|p| p.id() == player_id))
    }

    fn snapshot(&self) -> RoomInfo {
        RoomInfo {
            id: self.id.clone(),
            players: self
                .players
                .each_ref()
                .map(|slot| slot.as_ref().map(PlayerHandle::info)),
            board: self.board,
            current_turn: self.turn,
            status: self.status,
        }
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.snapshot());
    }
}
