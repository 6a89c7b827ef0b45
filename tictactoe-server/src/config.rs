use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Tuning for a single room actor.
#[derive(Debug, Clone)]
pub struct RoomConfig {
    /// Pause between seating the second player and broadcasting `init`, so
    /// both connections have their outbound loops running.
    pub settle_delay: Duration,
    /// Upper bound on how long one player's full queue may stall a broadcast.
    pub broadcast_timeout: Duration,
    /// Capacity of each of the room's inbound channels.
    pub inbox_capacity: usize,
    /// A waiting room with no seated player closes after this long.
    pub waiting_ttl: Duration,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(500),
            broadcast_timeout: Duration::from_secs(5),
            inbox_capacity: 64,
            waiting_ttl: Duration::from_secs(10 * 60),
        }
    }
}

/// Tuning for a player's connection pump.
#[derive(Debug, Clone)]
pub struct PumpConfig {
    /// A connection that stays silent this long is dropped.
    pub idle_timeout: Duration,
    /// Capacity of each outbound queue.
    pub outbox_capacity: usize,
}

impl Default for PumpConfig {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(15 * 60),
            outbox_capacity: 32,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Directory holding `index.html`, `room.html` and `404.html`.
    pub scenes_dir: PathBuf,
    pub room: RoomConfig,
    pub pump: PumpConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 3000)),
            scenes_dir: PathBuf::from("scenes"),
            room: RoomConfig::default(),
            pump: PumpConfig::default(),
        }
    }
}
