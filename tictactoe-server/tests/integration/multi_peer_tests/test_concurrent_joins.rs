use tictactoe_core::{ActionType, RoomStatus, Side};
use tictactoe_server::Player;

use crate::integration::init_tracing;
use crate::utils::{create_test_room, fast_room_config};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_joins_activate_once() {
    init_tracing();

    let room = create_test_room(fast_room_config());

    let (a, a_handle) = Player::new("racing-fox", 16);
    let (b, b_handle) = Player::new("racing-wolf", 16);

    let (ra, rb) = tokio::join!(room.join(a_handle), room.join(b_handle));
    ra.unwrap();
    rb.unwrap();

    let (a_identity, mut a_outbox) = a.into_parts();
    let (b_identity, mut b_outbox) = b.into_parts();

    for outbox in [&mut a_outbox, &mut b_outbox] {
        let init = outbox.actions.recv().await.expect("init");
        assert_eq!(init.action_type, ActionType::Init);
    }

    let mut sides = [a_identity.side(), b_identity.side()];
    sides.sort_by_key(|side| side.map(|s| s == Side::O));
    assert_eq!(sides, [Some(Side::X), Some(Side::O)]);

    // Exactly one init each: nothing else is queued.
    assert!(a_outbox.actions.try_recv().is_err());
    assert!(b_outbox.actions.try_recv().is_err());
    assert_eq!(room.snapshot().status, RoomStatus::Active);
}
