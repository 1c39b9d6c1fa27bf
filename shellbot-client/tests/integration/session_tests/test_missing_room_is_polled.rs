use shellbot_core::SignalMessage;
use std::time::Duration;

use crate::integration::{create_test_session, init_tracing};
use crate::utils::{MockSignaling, next_command};

#[tokio::test(start_paused = true)]
async fn test_missing_room_is_polled() {
    init_tracing();

    let session = create_test_session("demo");
    let (signaling, mut rx) = MockSignaling::new();

    session.handshake(&signaling).await;
    let mut last = next_command(&mut rx, 1000).await.expect("no readRoom sent");

    for _ in 0..3 {
        session.room_read(&signaling, None).await;

        let next = next_command(&mut rx, 10_000).await.expect("room was not polled again");
        assert!(matches!(next.message, SignalMessage::ReadRoom { ref name } if name == "demo"));
        assert!(
            next.at.duration_since(last.at) >= Duration::from_millis(3000),
            "polled after {:?}",
            next.at.duration_since(last.at)
        );
        last = next;
    }

    assert_eq!(signaling.room_reads().await.len(), 4);
    assert!(signaling.joins().await.is_empty());
}
