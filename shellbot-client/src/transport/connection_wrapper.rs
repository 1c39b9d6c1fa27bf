use crate::transport::transport_config::TransportConfig;
use crate::transport::transport_event::TransportEvent;
use anyhow::{Context, Result};
use bytes::Bytes;
use shellbot_core::PeerId;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::data_channel::RTCDataChannel;
use webrtc::data_channel::data_channel_message::DataChannelMessage;
use webrtc::ice_transport::ice_candidate::{RTCIceCandidate, RTCIceCandidateInit};
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;

/// WebRTC соединение робота с одним удаленным пиром. Робот всегда отвечающая сторона.
///
/// `generation` отличает это соединение от прошлых соединений того же пира:
/// события старого соединения приходят с его номером.
pub struct ConnectionWrapper {
    pub peer_id: PeerId,
    pub generation: u64,
    pub peer_connection: Arc<RTCPeerConnection>,
}

impl ConnectionWrapper {
    /// event_tx: канал, в который транспорт отдает события сетке пиров.
    pub async fn new(
        peer_id: PeerId,
        generation: u64,
        config: &TransportConfig,
        event_tx: mpsc::Sender<TransportEvent>,
    ) -> Result<Self> {
        // Кодеки регистрируем, даже если медиа робот не отправляет
        let mut m = MediaEngine::default();
        m.register_default_codecs()?;
        let registry = register_default_interceptors(Registry::new(), &mut m)?;

        let api = APIBuilder::new()
            .with_media_engine(m)
            .with_interceptor_registry(registry)
            .build();

        let rtc_config = RTCConfiguration {
            ice_servers: config
                .ice_servers
                .iter()
                .map(|server| RTCIceServer {
                    urls: server.urls.clone(),
                    username: server.username.clone().unwrap_or_default(),
                    credential: server.credential.clone().unwrap_or_default(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        };

        let peer_connection = Arc::new(api.new_peer_connection(rtc_config).await?);

        // A. Состояние соединения
        let state_tx = event_tx.clone();
        let uid_state = peer_id.clone();
        peer_connection.on_peer_connection_state_change(Box::new(
            move |s: RTCPeerConnectionState| {
                let tx = state_tx.clone();
                let uid = uid_state.clone();

                Box::pin(async move {
                    info!("Peer connection state for {} (#{}): {:?}", uid, generation, s);
                    match s {
                        RTCPeerConnectionState::Failed
                        | RTCPeerConnectionState::Disconnected
                        | RTCPeerConnectionState::Closed => {
                            let _ = tx.send(TransportEvent::Disconnected(uid, generation)).await;
                        }
                        _ => {}
                    }
                })
            },
        ));

        // B. Trickle ICE: локальные кандидаты уходят пиру через сигналинг
        let ice_tx = event_tx.clone();
        let uid_ice = peer_id.clone();
        peer_connection.on_ice_candidate(Box::new(move |c: Option<RTCIceCandidate>| {
            let tx = ice_tx.clone();
            let uid = uid_ice.clone();

            Box::pin(async move {
                let Some(candidate) = c else { return };
                let Ok(init) = candidate.to_json() else {
                    return;
                };
                let _ = tx.send(TransportEvent::CandidateGenerated(uid, init)).await;
            })
        }));

        // C. DataChannel создает удаленная сторона
        let dc_tx = event_tx.clone();
        let uid_dc = peer_id.clone();
        peer_connection.on_data_channel(Box::new(move |dc: Arc<RTCDataChannel>| {
            let tx = dc_tx.clone();
            let uid = uid_dc.clone();

            Box::pin(async move {
                debug!("DataChannel '{}' offered by {}", dc.label(), uid);

                let dc_ready = dc.clone();
                let tx_open = tx.clone();
                let uid_open = uid.clone();
                dc.on_open(Box::new(move || {
                    let tx = tx_open.clone();
                    let uid = uid_open.clone();
                    let channel = dc_ready.clone();

                    Box::pin(async move {
                        info!("DataChannel open for {}", uid);
                        let _ = tx
                            .send(TransportEvent::DataChannelReady(uid, generation, channel))
                            .await;
                    })
                }));

                let tx_msg = tx.clone();
                let uid_msg = uid.clone();
                dc.on_message(Box::new(move |msg: DataChannelMessage| {
                    let tx = tx_msg.clone();
                    let uid = uid_msg.clone();
                    Box::pin(async move {
                        let bytes = Bytes::from(msg.data.to_vec());
                        let _ = tx.send(TransportEvent::Message(uid, bytes)).await;
                    })
                }));
            })
        }));

        Ok(Self {
            peer_id,
            generation,
            peer_connection,
        })
    }

    /// Применить SDP Offer пира
    pub async fn set_remote_offer(&self, sdp: String) -> Result<()> {
        let desc = RTCSessionDescription::offer(sdp)?;
        self.peer_connection
            .set_remote_description(desc)
            .await
            .with_context(|| format!("Failed to apply offer from {}", self.peer_id))?;
        Ok(())
    }

    /// Создать SDP Answer и установить его как LocalDescription
    pub async fn create_answer(&self) -> Result<String> {
        let answer = self.peer_connection.create_answer(None).await?;
        self.peer_connection
            .set_local_description(answer.clone())
            .await?;
        Ok(answer.sdp)
    }

    /// Добавить удаленного ICE-кандидата (Trickle ICE)
    pub async fn add_ice_candidate(&self, candidate: RTCIceCandidateInit) -> Result<()> {
        self.peer_connection
            .add_ice_candidate(candidate)
            .await
            .context("Failed to add ICE candidate")?;
        Ok(())
    }

    pub async fn close(&self) -> Result<()> {
        self.peer_connection.close().await?;
        Ok(())
    }
}
