use crate::config::RoomConfig;
use crate::names;
use crate::room::{Room, RoomHandle};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use tictactoe_core::{RoomId, RoomInfo};
use tracing::info;

/// Registry of live rooms. Cheap to clone; every clone shares the same map.
#[derive(Clone)]
pub struct RoomManager {
    rooms: Arc<DashMap<RoomId, RoomHandle>>,
    config: RoomConfig,
}

impl RoomManager {
    pub fn new(config: RoomConfig) -> Self {
        Self {
            rooms: Arc::new(DashMap::new()),
            config,
        }
    }

    /// Spawns a new room actor under a fresh id. The entry is removed once
    /// the actor exits.
    pub fn create_room(&self) -> RoomHandle {
        let (room, handle) = loop {
            match self.rooms.entry(names::room_id()) {
                Entry::Occupied(_) => continue,
                Entry::Vacant(entry) => {
                    let (room, handle) = Room::new(entry.key().clone(), self.config.clone());
                    entry.insert(handle.clone());
                    break (room, handle);
                }
            }
        };

        info!("Creating new room: {}", handle.id());

        let rooms = self.rooms.clone();
        let id = handle.id().clone();
        tokio::spawn(async move {
            room.run().await;
            rooms.remove(&id);
            info!("Room {} removed from registry", id);
        });

        handle
    }

    /// A room whose actor already exited is treated as gone even if its
    /// entry has not been removed yet.
    pub fn get_room(&self, room_id: &RoomId) -> Option<RoomHandle> {
        self.rooms
            .get(room_id)
            .map(|entry| entry.value().clone())
            .filter(|room| !room.is_closed())
    }

    pub fn list_rooms(&self) -> Vec<RoomInfo> {
        self.rooms
            .iter()
            .map(|entry| entry.value().snapshot())
            .collect()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

impl Default for RoomManager {
    fn default() -> Self {
        Self::new(RoomConfig::default())
    }
}
