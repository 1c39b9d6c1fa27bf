use bytes::Bytes;
use shellbot_client::{ShellConfig, ShellProcess};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::integration::init_tracing;

#[tokio::test]
async fn test_real_shell_round_trip() {
    init_tracing();

    let config = ShellConfig {
        program: "/bin/sh".to_string(),
        plugin_id: "nisdos/terminal".to_string(),
    };
    let (output_tx, mut output_rx) = mpsc::channel(16);

    let process = ShellProcess::spawn(&config, output_tx).expect("failed to spawn /bin/sh");
    assert!(process.pid().is_some());

    let input = process.input();
    input.send(Bytes::from_static(b"echo hello\n")).unwrap();
    input.send(Bytes::from_static(b"echo oops 1>&2\n")).unwrap();

    let mut lines = Vec::new();
    while lines.len() < 2 {
        let line = tokio::time::timeout(Duration::from_secs(5), output_rx.recv())
            .await
            .expect("no shell output")
            .expect("output channel closed");
        lines.push(line);
    }
    lines.sort();

    assert_eq!(lines, ["hello", "oops"]);
}

#[tokio::test]
async fn test_missing_shell_fails_to_spawn() {
    let config = ShellConfig {
        program: "/nonexistent/shell".to_string(),
        plugin_id: "nisdos/terminal".to_string(),
    };
    let (output_tx, _output_rx) = mpsc::channel(16);

    assert!(ShellProcess::spawn(&config, output_tx).is_err());
}
