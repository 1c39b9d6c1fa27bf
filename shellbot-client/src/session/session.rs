use crate::config::RoomConfig;
use crate::room::RoomController;
use crate::session::{ConnectionSession, SessionEvent, SessionState};
use crate::shell::ShellBridge;
use crate::transport::{MeshCommand, PeerChannels, PeerMessage};
use shellbot_core::{ChannelId, ChannelPacket, Participant, ParticipantRole, ShellMessage};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Входящие каналы цикла сессии.
pub struct SessionIo {
    pub events: mpsc::Receiver<SessionEvent>,
    pub peer_messages: mpsc::Receiver<PeerMessage>,
    pub shell_output: mpsc::Receiver<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Сервер удалил комнату. Штатное завершение робота.
    RoomRemoved,
    /// Источник событий сессии закрыт.
    EventsClosed,
}

/// Единственный управляющий цикл клиента-робота.
pub struct Session {
    connection: ConnectionSession,
    room: RoomController,
    bridge: ShellBridge,
    channels: Arc<dyn PeerChannels>,
    mesh_tx: mpsc::Sender<MeshCommand>,
    io: SessionIo,
}

impl Session {
    pub fn new(
        room: RoomConfig,
        bridge: ShellBridge,
        channels: Arc<dyn PeerChannels>,
        mesh_tx: mpsc::Sender<MeshCommand>,
        io: SessionIo,
    ) -> Self {
        Self {
            connection: ConnectionSession::new(),
            room: RoomController::new(room),
            bridge,
            channels,
            mesh_tx,
            io,
        }
    }

    pub fn state(&self) -> SessionState {
        self.connection.state()
    }

    pub async fn run(mut self) -> SessionOutcome {
        info!("Session event loop started for room '{}'", self.room.room_name());

        let outcome = loop {
            tokio::select! {
                evt = self.io.events.recv() => {
                    match evt {
                        Some(e) => {
                            if let Some(outcome) = self.handle_event(e).await {
                                break outcome;
                            }
                        }
                        None => {
                            warn!("Session event channel closed");
                            break SessionOutcome::EventsClosed;
                        }
                    }
                }

                Some(msg) = self.io.peer_messages.recv() => {
                    self.handle_peer_message(msg).await;
                }

                Some(line) = self.io.shell_output.recv() => {
                    self.bridge.forward_output(&line, self.channels.as_ref()).await;
                }
            }
        };

        info!("Session event loop finished: {:?}", outcome);
        outcome
    }

    async fn handle_event(&mut self, event: SessionEvent) -> Option<SessionOutcome> {
        match event {
            SessionEvent::Connecting => {
                self.connection.connecting();
            }

            SessionEvent::HandshakeCompleted { local_id, commands } => {
                info!("Handshake completed, assigned id {}", local_id);
                self.connection.handshake_completed(local_id);
                self.notify_mesh(MeshCommand::AttachSignaling(commands.clone()))
                    .await;
                self.room.on_handshake(&commands).await;
            }

            SessionEvent::RoomRead { id, commands } => {
                if self.connection.state() != SessionState::Handshaking {
                    debug!(
                        "Ignoring room lookup result in state {:?}",
                        self.connection.state()
                    );
                    return None;
                }
                self.room.on_room_read(id, &commands).await;
            }

            SessionEvent::JoinedRoom { room_id, commands } => {
                let Some(local_id) = self.connection.local_id().cloned() else {
                    warn!("Joined room {} before the handshake completed", room_id);
                    return None;
                };

                self.connection.joined();
                let rules = self.room.on_joined(room_id, &local_id, &commands).await;
                self.notify_mesh(MeshCommand::InstallRules {
                    local: Participant::new(local_id, ParticipantRole::Robot),
                    rules,
                })
                .await;
            }

            SessionEvent::RoomRemoved => {
                info!("Room '{}' was removed, ending session", self.room.room_name());
                self.connection.terminate();
                self.room.on_removed();
                return Some(SessionOutcome::RoomRemoved);
            }

            SessionEvent::TransportDropped => {
                match self.connection.state() {
                    SessionState::Handshaking | SessionState::Joined => {
                        warn!("Signaling connection lost")
                    }
                    _ => debug!("Signaling connection attempt ended"),
                }
                self.connection.dropped();
                self.room.on_transport_dropped();
                self.notify_mesh(MeshCommand::DetachSignaling).await;
            }

            SessionEvent::PeerUpdate { peer_id, role } => {
                self.notify_mesh(MeshCommand::PeerUpdate { peer_id, role })
                    .await;
            }

            SessionEvent::PeerRemoved { peer_id } => {
                self.notify_mesh(MeshCommand::PeerRemoved { peer_id }).await;
            }

            SessionEvent::Exchange { from, payload } => {
                self.notify_mesh(MeshCommand::Exchange { from, payload })
                    .await;
            }

            SessionEvent::IceConfig { ice_servers } => {
                self.notify_mesh(MeshCommand::IceConfig { ice_servers })
                    .await;
            }
        }

        None
    }

    async fn handle_peer_message(&mut self, msg: PeerMessage) {
        let packet = match serde_json::from_slice::<ChannelPacket>(&msg.data) {
            Ok(packet) => packet,
            Err(e) => {
                debug!("Dropping malformed message from {}: {}", msg.peer_id, e);
                return;
            }
        };

        if packet.id != ChannelId::SHELL {
            debug!("Ignoring message on channel {} from {}", packet.id, msg.peer_id);
            return;
        }

        let message = match serde_json::from_value::<ShellMessage>(packet.data) {
            Ok(message) => message,
            Err(e) => {
                debug!("Dropping malformed shell message from {}: {}", msg.peer_id, e);
                return;
            }
        };

        if let Err(e) = self
            .bridge
            .handle_message(&msg.peer_id, message, self.channels.as_ref())
            .await
        {
            error!("Failed to deliver input from {} to the shell: {}", msg.peer_id, e);
        }
    }

    async fn notify_mesh(&self, cmd: MeshCommand) {
        if self.mesh_tx.send(cmd).await.is_err() {
            warn!("Peer mesh is gone");
        }
    }
}
