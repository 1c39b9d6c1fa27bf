use futures::{SinkExt, StreamExt};
use serde_json::{Value, json};
use shellbot_client::{ClientConfig, SessionOutcome, ShellConfig, run_client};
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::tungstenite::Message;

use crate::integration::init_tracing;

type ServerSocket = WebSocketStream<TcpStream>;

async fn expect_frame(socket: &mut ServerSocket) -> Value {
    loop {
        let frame = tokio::time::timeout(Duration::from_secs(5), socket.next())
            .await
            .expect("client went silent")
            .expect("client closed the socket")
            .unwrap();

        if let Message::Text(text) = frame {
            return serde_json::from_str(text.as_str()).unwrap();
        }
    }
}

async fn reply(socket: &mut ServerSocket, frame: Value) {
    socket
        .send(Message::Text(frame.to_string().into()))
        .await
        .unwrap();
}

/// Minimal signaling server: one lookup miss, then join and remove.
async fn serve_once(listener: TcpListener) -> Vec<Value> {
    let (stream, _) = listener.accept().await.unwrap();
    let mut socket = tokio_tungstenite::accept_async(stream).await.unwrap();
    let mut seen = Vec::new();

    let hello = expect_frame(&mut socket).await;
    seen.push(hello);
    reply(&mut socket, json!({"op": "welcome", "d": {"peerId": "robot-1"}})).await;

    let read = expect_frame(&mut socket).await;
    seen.push(read);
    reply(&mut socket, json!({"op": "roomRead", "d": {"id": null}})).await;

    let read_again = expect_frame(&mut socket).await;
    seen.push(read_again);
    reply(&mut socket, json!({"op": "roomRead", "d": {"id": "demo"}})).await;

    let join = expect_frame(&mut socket).await;
    seen.push(join);
    reply(&mut socket, json!({"op": "joinedRoom", "d": {"roomId": "demo"}})).await;

    let rules = expect_frame(&mut socket).await;
    seen.push(rules);
    reply(&mut socket, json!({"op": "roomRemoved"})).await;

    seen
}

#[tokio::test]
async fn test_ws_link_full_cycle() {
    init_tracing();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = tokio::spawn(serve_once(listener));

    let mut config = ClientConfig::new("demo", None);
    config.signaling.server_url = format!("http://127.0.0.1:{port}");
    config.room.poll_interval = Duration::from_millis(50);
    config.shell = ShellConfig {
        program: "/bin/sh".to_string(),
        plugin_id: "nisdos/terminal".to_string(),
    };

    let outcome = tokio::time::timeout(Duration::from_secs(10), run_client(config))
        .await
        .expect("client did not finish")
        .unwrap();
    assert_eq!(outcome, SessionOutcome::RoomRemoved);

    let seen = server.await.unwrap();
    assert_eq!(seen[0], json!({"op": "hello", "d": {"protoVersion": 4}}));
    assert_eq!(seen[1], json!({"op": "readRoom", "d": {"name": "demo"}}));
    assert_eq!(seen[2], seen[1]);
    assert_eq!(
        seen[3],
        json!({
            "op": "robotJoin",
            "d": {
                "roomId": "demo",
                "robotId": 1,
                "connectKey": "",
                "options": {"removable": false, "singleton": true}
            }
        })
    );
    assert_eq!(seen[4]["op"], "addRuleSet");
    assert_eq!(seen[4]["d"]["rules"].as_array().unwrap().len(), 8);
    assert_eq!(
        seen[4]["d"]["rules"][0],
        json!([
            [1, 1],
            {
                "data": true,
                "audio": {"in": false, "out": false},
                "video": {"in": false, "out": false}
            }
        ])
    );
}
