use tictactoe_core::{ActionType, Board, GameStatus, RoomNotification, RoomStatus, Side};

use crate::integration::init_tracing;
use crate::utils::{TestPlayer, create_test_room, fast_room_config, wait_for_status};

#[tokio::test]
async fn test_join_assigns_sides() {
    init_tracing();

    let room = create_test_room(fast_room_config());

    let mut first = TestPlayer::join(&room, "first-otter").await;
    let RoomNotification::GameInfo { room: info, player } = first.next_notification().await else {
        panic!("expected game_info");
    };
    assert_eq!(player.side, Some(Side::X));
    assert_eq!(player.id, first.identity.id);
    assert_eq!(info.status, RoomStatus::Waiting);
    assert_eq!(info.players[0].as_ref().map(|p| p.id), Some(first.identity.id));
    assert!(info.players[1].is_none());
    assert_eq!(first.side(), Some(Side::X));

    let mut second = TestPlayer::join(&room, "second-heron").await;

    // Both seated players hear about the second join, each with their own view.
    let RoomNotification::GameInfo { room: info, player } = first.next_notification().await else {
        panic!("expected game_info");
    };
    assert_eq!(player.side, Some(Side::X));
    assert!(info.is_full());

    let RoomNotification::GameInfo { player, .. } = second.next_notification().await else {
        panic!("expected game_info");
    };
    assert_eq!(player.side, Some(Side::O));
    assert_eq!(second.side(), Some(Side::O));

    for player in [&mut first, &mut second] {
        let init = player.next_action().await;
        assert_eq!(init.action_type, ActionType::Init);
        assert_eq!(init.data.board, Board::new());
        assert_eq!(init.data.status, GameStatus::Ongoing);
    }

    let info = wait_for_status(&room, RoomStatus::Active).await;
    assert_eq!(info.status, RoomStatus::Active);
    assert_eq!(info.current_turn, Side::X);
}
