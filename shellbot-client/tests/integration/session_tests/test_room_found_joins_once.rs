use shellbot_core::{JoinOptions, RoomId, SignalMessage};

use crate::integration::{create_test_session, init_tracing};
use crate::utils::{MockSignaling, next_command};

#[tokio::test(start_paused = true)]
async fn test_room_found_joins_once() {
    init_tracing();

    let session = create_test_session("demo");
    let (signaling, mut rx) = MockSignaling::new();

    session.handshake(&signaling).await;
    next_command(&mut rx, 1000).await.expect("no readRoom sent");

    session.room_read(&signaling, Some("room-42")).await;

    let cmd = next_command(&mut rx, 1000).await.expect("no robotJoin sent");
    let SignalMessage::RobotJoin(join) = cmd.message else {
        panic!("expected robotJoin, got {:?}", cmd.message);
    };
    assert_eq!(join.room_id, RoomId::from("demo"));
    assert_eq!(join.robot_id, 1);
    assert_eq!(join.connect_key, "");
    assert_eq!(
        join.options,
        JoinOptions {
            removable: false,
            singleton: true,
        }
    );

    // A duplicate answer must not produce a second join
    session.room_read(&signaling, Some("room-42")).await;
    assert!(next_command(&mut rx, 10_000).await.is_none());
    assert_eq!(signaling.joins().await.len(), 1);
}
