use crate::policy::RuleSet;
use crate::signaling::SignalingCommands;
use crate::transport::{
    ConnectionWrapper, MeshCommand, PeerContext, PeerMessage, TransportConfig, TransportEvent,
};
use shellbot_core::{ChannelPolicy, ExchangePayload, Participant, ParticipantRole, PeerId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use webrtc::ice_transport::ice_candidate::RTCIceCandidateInit;

/// WebRTC соединения с остальными участниками комнаты.
///
/// Удаленные пиры присылают Offer, робот отвечает. Соединение создается,
/// только если установленные правила дают DataChannel между роботом и пиром.
pub struct PeerMesh {
    context: PeerContext,
    transports: HashMap<PeerId, ConnectionWrapper>,
    roles: HashMap<PeerId, ParticipantRole>,
    local: Option<Participant>,
    rules: RuleSet,
    signaling: Option<Arc<dyn SignalingCommands>>,
    command_rx: mpsc::Receiver<MeshCommand>,
    transport_rx: mpsc::Receiver<TransportEvent>,
    transport_tx: mpsc::Sender<TransportEvent>,
    message_tx: mpsc::Sender<PeerMessage>,
    transport_config: TransportConfig,
    next_generation: u64,
}

impl PeerMesh {
    pub fn new(
        command_rx: mpsc::Receiver<MeshCommand>,
        message_tx: mpsc::Sender<PeerMessage>,
        transport_config: TransportConfig,
    ) -> Self {
        let (transport_tx, transport_rx) = mpsc::channel(256);

        Self {
            context: PeerContext::new(),
            transports: HashMap::new(),
            roles: HashMap::new(),
            local: None,
            rules: RuleSet::default(),
            signaling: None,
            command_rx,
            transport_rx,
            transport_tx,
            message_tx,
            transport_config,
            next_generation: 0,
        }
    }

    /// Ручка для отправки по DataChannel этой сетки.
    pub fn context(&self) -> PeerContext {
        self.context.clone()
    }

    pub async fn run(mut self) {
        info!("Peer mesh event loop started");

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(c) => self.handle_command(c).await,
                        None => {
                            info!("Command channel closed. Shutting down peer mesh.");
                            break;
                        }
                    }
                }

                evt = self.transport_rx.recv() => {
                    match evt {
                        Some(e) => self.handle_transport_event(e).await,
                        None => {
                            warn!("Transport channel closed unexpectedly");
                            break;
                        }
                    }
                }
            }
        }

        let peers: Vec<PeerId> = self.transports.keys().cloned().collect();
        for peer_id in peers {
            self.remove_peer(&peer_id).await;
        }
        info!("Peer mesh event loop finished");
    }

    /// Политика между роботом и `peer_id`. `DENY`, пока робот не вошел в
    /// комнату и роль пира неизвестна.
    pub fn policy_for(&self, peer_id: &PeerId) -> ChannelPolicy {
        let (Some(local), Some(role)) = (&self.local, self.roles.get(peer_id)) else {
            return ChannelPolicy::DENY;
        };
        self.rules
            .resolve(local, &Participant::new(peer_id.clone(), *role))
    }

    async fn handle_command(&mut self, cmd: MeshCommand) {
        match cmd {
            MeshCommand::AttachSignaling(signaling) => {
                self.signaling = Some(signaling);
            }

            MeshCommand::DetachSignaling => {
                self.signaling = None;
            }

            MeshCommand::InstallRules { local, rules } => {
                info!("Installing {} channel rules for {}", rules.len(), local.id);
                self.local = Some(local);
                self.rules = rules;
                self.drop_denied_peers().await;
            }

            MeshCommand::PeerUpdate { peer_id, role } => {
                debug!("Peer {} is {}", peer_id, role);
                self.roles.insert(peer_id, role);
            }

            MeshCommand::PeerRemoved { peer_id } => {
                info!("Peer {} left the room", peer_id);
                self.roles.remove(&peer_id);
                self.remove_peer(&peer_id).await;
            }

            MeshCommand::Exchange { from, payload } => match payload {
                ExchangePayload::Offer { sdp } => self.accept_offer(from, sdp).await,

                ExchangePayload::IceCandidate {
                    candidate,
                    sdp_mid,
                    sdp_m_line_index,
                } => {
                    let Some(transport) = self.transports.get(&from) else {
                        debug!("ICE candidate from {} without a connection", from);
                        return;
                    };
                    let init = RTCIceCandidateInit {
                        candidate,
                        sdp_mid,
                        sdp_mline_index: sdp_m_line_index,
                        ..Default::default()
                    };
                    let Err(e) = transport.add_ice_candidate(init).await else {
                        return;
                    };
                    warn!("Failed to add ICE candidate for {}: {:?}", from, e);
                }

                ExchangePayload::Answer { .. } => {
                    warn!("Unexpected SDP answer from {}: the robot never offers", from);
                }
            },

            MeshCommand::IceConfig { ice_servers } => {
                info!("Received ICE config: {} servers", ice_servers.len());
                self.transport_config.ice_servers = ice_servers;
            }
        }
    }

    async fn accept_offer(&mut self, peer_id: PeerId, sdp: String) {
        let policy = self.policy_for(&peer_id);
        if !policy.data {
            warn!("Refusing offer from {}: no rule grants a data channel", peer_id);
            return;
        }

        info!(
            "Accepting offer from {} (audio {:?}, video {:?})",
            peer_id, policy.audio, policy.video
        );

        if self.transports.contains_key(&peer_id) {
            self.remove_peer(&peer_id).await;
        }

        self.next_generation += 1;
        let transport = match ConnectionWrapper::new(
            peer_id.clone(),
            self.next_generation,
            &self.transport_config,
            self.transport_tx.clone(),
        )
        .await
        {
            Ok(transport) => transport,
            Err(e) => {
                error!("Failed to create transport for {}: {:?}", peer_id, e);
                return;
            }
        };

        if let Err(e) = transport.set_remote_offer(sdp).await {
            error!("SDP error for {}: {:?}", peer_id, e);
            return;
        }

        match transport.create_answer().await {
            Ok(answer) => {
                self.transports.insert(peer_id.clone(), transport);
                self.signal(peer_id, ExchangePayload::Answer { sdp: answer })
                    .await;
            }
            Err(e) => error!("Failed to create answer for {}: {:?}", peer_id, e),
        }
    }

    async fn handle_transport_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::DataChannelReady(peer_id, generation, channel) => {
                if !self.is_current(&peer_id, generation) {
                    debug!("Ignoring DataChannel of replaced connection #{} to {}", generation, peer_id);
                    return;
                }
                info!("Peer {} connected (DataChannel ready)", peer_id);
                self.context.insert(peer_id, channel);
            }

            TransportEvent::Message(peer_id, data) => {
                if self
                    .message_tx
                    .send(PeerMessage { peer_id, data })
                    .await
                    .is_err()
                {
                    warn!("Session is gone, dropping peer message");
                }
            }

            TransportEvent::Disconnected(peer_id, generation) => {
                // Старое соединение закрывается уже после замены новым
                if !self.is_current(&peer_id, generation) {
                    debug!("Ignoring disconnect of replaced connection #{} to {}", generation, peer_id);
                    return;
                }
                info!("Transport disconnected for {}", peer_id);
                self.remove_peer(&peer_id).await;
            }

            TransportEvent::CandidateGenerated(peer_id, init) => {
                let payload = ExchangePayload::IceCandidate {
                    candidate: init.candidate,
                    sdp_mid: init.sdp_mid,
                    sdp_m_line_index: init.sdp_mline_index,
                };
                self.signal(peer_id, payload).await;
            }
        }
    }

    fn is_current(&self, peer_id: &PeerId, generation: u64) -> bool {
        self.transports
            .get(peer_id)
            .is_some_and(|transport| transport.generation == generation)
    }

    async fn signal(&self, peer_id: PeerId, payload: ExchangePayload) {
        let Some(signaling) = &self.signaling else {
            warn!("No signaling link, dropping exchange for {}", peer_id);
            return;
        };
        if let Err(e) = signaling.exchange(peer_id.clone(), payload).await {
            warn!("Failed to signal {}: {}", peer_id, e);
        }
    }

    async fn drop_denied_peers(&mut self) {
        let denied: Vec<PeerId> = self
            .transports
            .keys()
            .filter(|peer_id| !self.policy_for(peer_id).data)
            .cloned()
            .collect();

        for peer_id in denied {
            info!("Closing connection to {}: no longer allowed", peer_id);
            self.remove_peer(&peer_id).await;
        }
    }

    async fn remove_peer(&mut self, peer_id: &PeerId) {
        self.context.remove(peer_id);

        let Some(transport) = self.transports.remove(peer_id) else {
            return;
        };
        let _ = transport.close().await;
    }
}
