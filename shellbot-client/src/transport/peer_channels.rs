use async_trait::async_trait;
use bytes::Bytes;
use shellbot_core::{ChannelId, PeerId};

/// Отправка сообщений подключенным пирам по логическим каналам.
#[async_trait]
pub trait PeerChannels: Send + Sync {
    /// `target == None`: разослать всем подключенным пирам.
    async fn send(&self, channel: ChannelId, target: Option<&PeerId>, payload: serde_json::Value);

    fn list_peer_ids(&self) -> Vec<PeerId>;
}

/// Сообщение, пришедшее по DataChannel от пира.
#[derive(Debug, Clone)]
pub struct PeerMessage {
    pub peer_id: PeerId,
    pub data: Bytes,
}
