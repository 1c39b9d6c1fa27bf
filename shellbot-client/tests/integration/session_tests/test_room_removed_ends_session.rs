use shellbot_client::{SessionEvent, SessionOutcome};
use std::time::Duration;

use crate::integration::{create_test_session, init_tracing};
use crate::utils::{MockSignaling, next_command};

#[tokio::test(start_paused = true)]
async fn test_room_removed_ends_session() {
    init_tracing();

    let session = create_test_session("demo");
    let (signaling, mut rx) = MockSignaling::new();

    session.handshake(&signaling).await;
    next_command(&mut rx, 1000).await.expect("no readRoom sent");
    session.room_read(&signaling, Some("demo")).await;
    next_command(&mut rx, 1000).await.expect("no robotJoin sent");
    session.joined(&signaling, "demo").await;
    next_command(&mut rx, 1000).await.expect("no rule set sent");

    session.events_tx.send(SessionEvent::RoomRemoved).await.unwrap();

    let outcome = session.task.await.unwrap();
    assert_eq!(outcome, SessionOutcome::RoomRemoved);
}

#[tokio::test(start_paused = true)]
async fn test_room_removed_cancels_pending_poll() {
    init_tracing();

    let session = create_test_session("demo");
    let (signaling, mut rx) = MockSignaling::new();

    session.handshake(&signaling).await;
    next_command(&mut rx, 1000).await.expect("no readRoom sent");

    // Schedules a follow-up lookup in 3s
    session.room_read(&signaling, None).await;
    session.events_tx.send(SessionEvent::RoomRemoved).await.unwrap();

    let outcome = session.task.await.unwrap();
    assert_eq!(outcome, SessionOutcome::RoomRemoved);

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(rx.try_recv().is_err());
    assert_eq!(signaling.sent().await.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_room_removed_before_join_ends_session() {
    init_tracing();

    let session = create_test_session("demo");
    session.events_tx.send(SessionEvent::Connecting).await.unwrap();
    session.events_tx.send(SessionEvent::RoomRemoved).await.unwrap();

    let outcome = session.task.await.unwrap();
    assert_eq!(outcome, SessionOutcome::RoomRemoved);
}
