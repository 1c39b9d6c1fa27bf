use crate::transport::PeerChannels;
use async_trait::async_trait;
use dashmap::DashMap;
use shellbot_core::{ChannelId, ChannelPacket, PeerId};
use std::sync::Arc;
use tracing::{debug, error};
use webrtc::data_channel::RTCDataChannel;

/// Открытые DataChannel всех пиров.
/// Эту структуру безопасно клонировать и передавать между потоками.
#[derive(Clone, Default)]
pub struct PeerContext {
    peers: Arc<DashMap<PeerId, Arc<RTCDataChannel>>>,
}

impl PeerContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&self, peer_id: PeerId, channel: Arc<RTCDataChannel>) {
        self.peers.insert(peer_id, channel);
    }

    pub(crate) fn remove(&self, peer_id: &PeerId) -> bool {
        self.peers.remove(peer_id).is_some()
    }

    async fn send_text(&self, peer_id: &PeerId, text: String) {
        // Клонируем Arc, чтобы не держать guard карты во время await
        let Some(channel) = self.peers.get(peer_id).map(|entry| entry.value().clone()) else {
            // Пользователь мог отключиться в момент обработки
            error!("Attempted to send message to disconnected peer {}", peer_id);
            return;
        };

        if let Err(e) = channel.send_text(text).await {
            error!("Failed to send message to peer {}: {}", peer_id, e);
        }
    }
}

#[async_trait]
impl PeerChannels for PeerContext {
    async fn send(&self, channel: ChannelId, target: Option<&PeerId>, payload: serde_json::Value) {
        let text = match serde_json::to_string(&ChannelPacket::new(channel, payload)) {
            Ok(text) => text,
            Err(e) => {
                error!("Failed to serialize packet for channel {}: {}", channel, e);
                return;
            }
        };

        if let Some(peer_id) = target {
            self.send_text(peer_id, text).await;
            return;
        }

        // Рассылка по очереди: порядок сообщений для каждого пира сохраняется.
        let channels: Vec<_> = self
            .peers
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();

        debug!("Broadcasting on channel {} to {} peers", channel, channels.len());
        for (peer_id, dc) in channels {
            if let Err(e) = dc.send_text(text.clone()).await {
                error!("Broadcast to peer {} failed: {}", peer_id, e);
            }
        }
    }

    fn list_peer_ids(&self) -> Vec<PeerId> {
        self.peers.iter().map(|entry| entry.key().clone()).collect()
    }
}
