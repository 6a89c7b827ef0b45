use axum::extract::ws::Message;
use std::time::Duration;
use tictactoe_core::RoomStatus;

use crate::integration::init_tracing;
use crate::utils::{connect_player, create_test_room, fast_room_config, wait_for_status};

const IDLE: Duration = Duration::from_secs(30);

#[tokio::test]
async fn test_hang_up_forfeits_active_game() {
    init_tracing();

    let room = create_test_room(fast_room_config());
    let (mut x, x_pump) = connect_player(&room, "first-otter", IDLE).await;
    let (mut o, _o_pump) = connect_player(&room, "second-heron", IDLE).await;
    x.next_json_where("action_type", "init").await;
    o.next_json_where("action_type", "init").await;

    x.hang_up();
    tokio::time::timeout(Duration::from_secs(2), x_pump)
        .await
        .expect("pump should stop after hang-up")
        .unwrap();

    let end = o.next_json_where("action_type", "end").await;
    assert_eq!(end["data"]["status"], "O wins");
    assert_eq!(end["data"]["side"], "X");
    assert_eq!(end["data"]["actor"]["name"], "first-otter");

    // Exactly one end: the next thing the survivor sees is the close frame.
    assert!(matches!(o.next_frame().await, Some(Message::Close(None))));
    let info = wait_for_status(&room, RoomStatus::Finished).await;
    assert_eq!(info.status, RoomStatus::Finished);
}

#[tokio::test]
async fn test_close_frame_while_waiting_frees_the_seat() {
    init_tracing();

    let room = create_test_room(fast_room_config());
    let (mut x, x_pump) = connect_player(&room, "first-otter", IDLE).await;
    x.next_json_where("message_type", "game_info").await;

    x.send_frame(Message::Close(None)).await;
    x_pump.await.unwrap();

    let mut snapshots = room.subscribe();
    let info = tokio::time::timeout(
        Duration::from_secs(2),
        snapshots.wait_for(|info| info.players.iter().all(Option::is_none)),
    )
    .await
    .expect("seat should be freed")
    .unwrap()
    .clone();
    assert_eq!(info.status, RoomStatus::Waiting);

    // The next connection takes the first seat.
    let (mut next, _pump) = connect_player(&room, "patient-owl", IDLE).await;
    let info = next.next_json_where("message_type", "game_info").await;
    assert_eq!(info["data"]["player"]["side"], "X");
}

#[tokio::test]
async fn test_both_players_hang_up_at_once() {
    init_tracing();

    let room = create_test_room(fast_room_config());
    let (mut x, x_pump) = connect_player(&room, "first-otter", IDLE).await;
    let (mut o, o_pump) = connect_player(&room, "second-heron", IDLE).await;
    x.next_json_where("action_type", "init").await;
    o.next_json_where("action_type", "init").await;

    x.hang_up();
    o.hang_up();
    let (x_done, o_done) = tokio::join!(x_pump, o_pump);
    x_done.unwrap();
    o_done.unwrap();

    let frames = [x.drain_frames().await, o.drain_frames().await].concat();
    let ends: Vec<serde_json::Value> = frames
        .iter()
        .filter_map(|frame| match frame {
            Message::Text(text) => serde_json::from_str(text.as_str()).ok(),
            _ => None,
        })
        .filter(|json: &serde_json::Value| json["action_type"] == "end")
        .collect();

    // Whichever leave the room sees first decides the game; the second one
    // finds a finished room.
    assert!(ends.len() <= 1, "got {} end frames", ends.len());
    if let Some(end) = ends.first() {
        assert_ne!(end["data"]["status"], "ongoing");
    }

    let info = wait_for_status(&room, RoomStatus::Finished).await;
    assert_eq!(info.status, RoomStatus::Finished);
    tokio::time::timeout(Duration::from_secs(2), async {
        while !room.is_closed() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("room actor should exit");
}
