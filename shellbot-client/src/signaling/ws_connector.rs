use crate::config::SignalingConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::SessionEvent;
use crate::signaling::{Connector, SignalingCommands};
use async_trait::async_trait;
use futures::{SinkExt, Stream, StreamExt};
use shellbot_core::SignalMessage;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::{self, Message};
use tracing::{debug, error, info, warn};

/// WebSocket соединение с сигнальным сервером, текстовые JSON кадры.
#[derive(Debug, Clone, Copy, Default)]
pub struct WsConnector;

/// Ручка команд одного сокета. После остановки писателя возвращает ошибку.
struct WsCommands {
    tx: mpsc::UnboundedSender<SignalMessage>,
}

#[async_trait]
impl SignalingCommands for WsCommands {
    async fn send(&self, message: SignalMessage) -> ClientResult<()> {
        self.tx.send(message).map_err(|_| ClientError::LinkClosed)
    }
}

#[async_trait]
impl Connector for WsConnector {
    async fn connect(
        &self,
        config: &SignalingConfig,
        events: &mpsc::Sender<SessionEvent>,
    ) -> ClientResult<()> {
        let url = config.ws_url();
        info!("Connecting to signaling server {}", url);

        let (socket, _) = tokio_tungstenite::connect_async(&url).await?;
        info!("Signaling socket open: {}", url);

        let (mut sender, receiver) = socket.split();
        let (tx, mut rx) = mpsc::unbounded_channel::<SignalMessage>();
        let commands: Arc<dyn SignalingCommands> = Arc::new(WsCommands { tx });

        commands
            .send(SignalMessage::Hello {
                proto_version: config.protocol_version,
            })
            .await?;

        let mut send_task = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                let json = match serde_json::to_string(&msg) {
                    Ok(json) => json,
                    Err(e) => {
                        error!("Failed to serialize signal message: {}", e);
                        continue;
                    }
                };
                debug!("WS OUT: {}", json);
                if sender.send(Message::Text(json.into())).await.is_err() {
                    break;
                }
            }
        });

        let result = tokio::select! {
            res = read_frames(receiver, &commands, events) => res,
            _ = (&mut send_task) => Err(ClientError::LinkClosed),
        };

        send_task.abort();
        result
    }
}

async fn read_frames<S>(
    mut receiver: S,
    commands: &Arc<dyn SignalingCommands>,
    events: &mpsc::Sender<SessionEvent>,
) -> ClientResult<()>
where
    S: Stream<Item = Result<Message, tungstenite::Error>> + Unpin,
{
    while let Some(frame) = receiver.next().await {
        match frame? {
            Message::Text(text) => {
                debug!("WS IN: {}", text.as_str());

                let msg = match serde_json::from_str::<SignalMessage>(text.as_str()) {
                    Ok(msg) => msg,
                    Err(e) => {
                        warn!("Invalid signal frame: {}", e);
                        continue;
                    }
                };

                if let Some(event) = into_session_event(msg, commands) {
                    events
                        .send(event)
                        .await
                        .map_err(|_| ClientError::EventsClosed)?;
                }
            }
            Message::Close(frame) => {
                info!("Signaling server closed the socket: {:?}", frame);
                break;
            }
            _ => {}
        }
    }

    Ok(())
}

/// Переводит кадр сервера в событие сессии.
pub(crate) fn into_session_event(
    msg: SignalMessage,
    commands: &Arc<dyn SignalingCommands>,
) -> Option<SessionEvent> {
    let event = match msg {
        SignalMessage::Welcome { peer_id } => SessionEvent::HandshakeCompleted {
            local_id: peer_id,
            commands: commands.clone(),
        },
        SignalMessage::RoomRead { id } => SessionEvent::RoomRead {
            id,
            commands: commands.clone(),
        },
        SignalMessage::JoinedRoom { room_id } => SessionEvent::JoinedRoom {
            room_id,
            commands: commands.clone(),
        },
        SignalMessage::RoomRemoved => SessionEvent::RoomRemoved,
        SignalMessage::PeerUpdate { peer_id, role } => SessionEvent::PeerUpdate { peer_id, role },
        SignalMessage::PeerRemoved { peer_id } => SessionEvent::PeerRemoved { peer_id },
        SignalMessage::Exchange { peer_id, payload } => SessionEvent::Exchange {
            from: peer_id,
            payload,
        },
        SignalMessage::IceConfig { ice_servers } => SessionEvent::IceConfig { ice_servers },
        SignalMessage::Error { message } => {
            warn!("Signaling server reported an error: {}", message);
            return None;
        }
        other @ (SignalMessage::Hello { .. }
        | SignalMessage::ReadRoom { .. }
        | SignalMessage::RobotJoin(_)
        | SignalMessage::AddRuleSet { .. }) => {
            warn!("Unexpected client-bound frame from server: {:?}", other);
            return None;
        }
    };

    Some(event)
}
