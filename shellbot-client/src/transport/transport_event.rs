use bytes::Bytes;
use shellbot_core::PeerId;
use std::sync::Arc;
use webrtc::data_channel::RTCDataChannel;
use webrtc::ice_transport::ice_candidate::RTCIceCandidateInit;

/// События, которые транспорт генерирует для сетки пиров (PeerMesh).
pub enum TransportEvent {
    /// DataChannel соединения с номером `u64` открыт и готов к передаче данных.
    DataChannelReady(PeerId, u64, Arc<RTCDataChannel>),

    /// Соединение с номером `u64` разорвано.
    Disconnected(PeerId, u64),

    /// Получено сообщение от пира.
    Message(PeerId, Bytes),

    /// Сгенерирован локальный ICE-кандидат, его нужно переслать пиру через сигналинг.
    CandidateGenerated(PeerId, RTCIceCandidateInit),
}
