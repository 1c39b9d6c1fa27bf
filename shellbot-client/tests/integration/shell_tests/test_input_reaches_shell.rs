use serde_json::json;
use shellbot_core::ChannelId;
use tokio::io::AsyncReadExt;

use crate::integration::{create_test_session, init_tracing};

#[tokio::test]
async fn test_input_reaches_shell() {
    init_tracing();

    let mut session = create_test_session("demo");

    session
        .peer_says("viewer-a", ChannelId::SHELL, json!({"cmd": "line", "args": ["ls"]}))
        .await;
    session
        .peer_says("viewer-a", ChannelId::SHELL, json!({"cmd": "key", "args": ["\u{3}"]}))
        .await;

    let mut buf = [0u8; 4];
    tokio::time::timeout(
        std::time::Duration::from_secs(5),
        session.shell_input.read_exact(&mut buf),
    )
    .await
    .expect("shell input not written")
    .unwrap();

    assert_eq!(&buf, b"ls\n\x03");
}

#[tokio::test]
async fn test_empty_commands_write_nothing() {
    init_tracing();

    let mut session = create_test_session("demo");

    session
        .peer_says("viewer-a", ChannelId::SHELL, json!({"cmd": "line", "args": []}))
        .await;
    session
        .peer_says("viewer-a", ChannelId::SHELL, json!({"cmd": "key"}))
        .await;
    session
        .peer_says("viewer-a", ChannelId::SHELL, json!({"cmd": "line", "args": ["pwd"]}))
        .await;

    let mut buf = [0u8; 4];
    tokio::time::timeout(
        std::time::Duration::from_secs(5),
        session.shell_input.read_exact(&mut buf),
    )
    .await
    .expect("shell input not written")
    .unwrap();

    assert_eq!(&buf, b"pwd\n");
}
