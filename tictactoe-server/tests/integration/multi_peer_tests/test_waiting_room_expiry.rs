use std::time::Duration;
use tictactoe_core::{RoomNotification, RoomStatus};
use tictactoe_server::RoomConfig;

use crate::integration::init_tracing;
use crate::utils::{TestPlayer, create_test_room};

const TTL: Duration = Duration::from_secs(60);

#[tokio::test(start_paused = true)]
async fn test_seated_player_keeps_waiting_room_open() {
    init_tracing();

    let room = create_test_room(RoomConfig {
        waiting_ttl: TTL,
        ..RoomConfig::default()
    });

    let mut early = TestPlayer::join(&room, "early-wren").await;
    assert!(matches!(
        early.next_notification().await,
        RoomNotification::GameInfo { .. }
    ));

    tokio::time::sleep(TTL * 2).await;
    assert!(!room.is_closed());
    assert_eq!(room.snapshot().status, RoomStatus::Waiting);

    // Once the room is empty again the clock restarts from the leave.
    room.leave(early.identity.id).await;
    tokio::time::sleep(TTL - Duration::from_secs(1)).await;
    assert!(!room.is_closed());

    let mut snapshots = room.subscribe();
    snapshots
        .wait_for(|info| info.status == RoomStatus::Finished)
        .await
        .unwrap();
    early.expect_closed().await;
}
