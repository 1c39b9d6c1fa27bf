use shellbot_client::{ClientConfig, SessionEvent, SessionOutcome};
use shellbot_core::{ChannelPolicy, SignalMessage};
use std::time::Duration;

use crate::integration::{create_test_session, init_tracing};
use crate::utils::{MockSignaling, next_command};

#[test]
fn test_demo_room_defaults() {
    let config = ClientConfig::new("demo", None);

    assert_eq!(config.signaling.server_url, "http://localhost:4010");
    assert_eq!(config.room.room_name, "demo");
    assert_eq!(config.shell.plugin_id, "nisdos/terminal");
}

/// The room appears after three lookups, the robot joins, and the host removes it.
#[tokio::test(start_paused = true)]
async fn test_demo_room_lifecycle() {
    init_tracing();

    let session = create_test_session("demo");
    let (signaling, mut rx) = MockSignaling::new();

    session.handshake(&signaling).await;
    next_command(&mut rx, 1000).await.expect("no readRoom sent");

    for _ in 0..3 {
        session.room_read(&signaling, None).await;
        next_command(&mut rx, 10_000).await.expect("room was not polled again");
    }

    let reads = signaling.room_reads().await;
    assert_eq!(reads.len(), 4);
    for pair in reads.windows(2) {
        assert!(pair[1].at.duration_since(pair[0].at) >= Duration::from_millis(3000));
    }

    session.room_read(&signaling, Some("demo")).await;
    let join = next_command(&mut rx, 1000).await.expect("no robotJoin sent");
    assert!(matches!(join.message, SignalMessage::RobotJoin(_)));

    session.joined(&signaling, "demo").await;
    let rules = next_command(&mut rx, 1000).await.expect("no rule set sent");
    let SignalMessage::AddRuleSet { rules } = rules.message else {
        panic!("expected addRuleSet");
    };
    assert_eq!(rules.len(), 8);
    assert!(rules.iter().all(|r| r.policy.data));
    assert!(rules.iter().take(3).all(|r| r.policy == ChannelPolicy::DATA_ONLY));

    session.events_tx.send(SessionEvent::RoomRemoved).await.unwrap();
    let outcome = session.task.await.unwrap();
    assert_eq!(outcome, SessionOutcome::RoomRemoved);

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(signaling.sent().await.len(), 6);
}
