use serde_json::json;
use shellbot_client::{SessionEvent, SessionOutcome};
use shellbot_core::ChannelId;
use std::time::Duration;
use tokio::io::AsyncReadExt;

use crate::integration::{SHELL_PIPE_CAPACITY, create_test_session, init_tracing};

#[tokio::test]
async fn test_busy_shell_does_not_stall_session() {
    init_tracing();

    let mut session = create_test_session("demo");

    // Twice the pipe buffer, and nobody reads the shell side yet
    let long_line = "x".repeat(SHELL_PIPE_CAPACITY * 2);
    session
        .peer_says("viewer-a", ChannelId::SHELL, json!({"cmd": "line", "args": [long_line]}))
        .await;

    // The first byte arriving means the line is past the session loop
    let mut first = [0u8; 1];
    tokio::time::timeout(Duration::from_secs(2), session.shell_input.read_exact(&mut first))
        .await
        .expect("line never reached the shell")
        .unwrap();

    session.events_tx.send(SessionEvent::RoomRemoved).await.unwrap();

    let outcome = tokio::time::timeout(Duration::from_secs(2), &mut session.task)
        .await
        .expect("session loop blocked on shell input")
        .unwrap();
    assert_eq!(outcome, SessionOutcome::RoomRemoved);

    // Input queued before the removal still reaches the shell
    let mut written = vec![0u8; SHELL_PIPE_CAPACITY * 2];
    tokio::time::timeout(
        Duration::from_secs(2),
        session.shell_input.read_exact(&mut written),
    )
    .await
    .expect("queued input was lost")
    .unwrap();

    assert!(written[..SHELL_PIPE_CAPACITY * 2 - 1].iter().all(|b| *b == b'x'));
    assert_eq!(written[SHELL_PIPE_CAPACITY * 2 - 1], b'\n');
}
