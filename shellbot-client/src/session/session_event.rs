use crate::signaling::SignalingCommands;
use shellbot_core::{ExchangePayload, IceServerConfig, ParticipantRole, PeerId, RoomId};
use std::fmt;
use std::sync::Arc;

/// События сигнального транспорта, поступающие в цикл сессии.
///
/// События, на которые сессия может ответить командой, несут ручку
/// `commands`, привязанную к тому соединению, которое их породило.
pub enum SessionEvent {
    /// Супервизор начинает новую попытку подключения.
    Connecting,

    /// Сервер принял рукопожатие и выдал клиенту id.
    HandshakeCompleted {
        local_id: PeerId,
        commands: Arc<dyn SignalingCommands>,
    },

    /// Ответ на `readRoom`. `id == None`: комнаты пока нет.
    RoomRead {
        id: Option<RoomId>,
        commands: Arc<dyn SignalingCommands>,
    },

    /// Сервер подтвердил вход в комнату.
    JoinedRoom {
        room_id: RoomId,
        commands: Arc<dyn SignalingCommands>,
    },

    /// Комната удалена сервером.
    RoomRemoved,

    /// Соединение с сервером потеряно или не установилось.
    TransportDropped,

    PeerUpdate {
        peer_id: PeerId,
        role: ParticipantRole,
    },

    PeerRemoved {
        peer_id: PeerId,
    },

    /// SDP/ICE от удаленного пира.
    Exchange {
        from: PeerId,
        payload: ExchangePayload,
    },

    IceConfig {
        ice_servers: Vec<IceServerConfig>,
    },
}

impl fmt::Debug for SessionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connecting => f.write_str("Connecting"),
            Self::HandshakeCompleted { local_id, .. } => f
                .debug_struct("HandshakeCompleted")
                .field("local_id", local_id)
                .finish_non_exhaustive(),
            Self::RoomRead { id, .. } => f
                .debug_struct("RoomRead")
                .field("id", id)
                .finish_non_exhaustive(),
            Self::JoinedRoom { room_id, .. } => f
                .debug_struct("JoinedRoom")
                .field("room_id", room_id)
                .finish_non_exhaustive(),
            Self::RoomRemoved => f.write_str("RoomRemoved"),
            Self::TransportDropped => f.write_str("TransportDropped"),
            Self::PeerUpdate { peer_id, role } => f
                .debug_struct("PeerUpdate")
                .field("peer_id", peer_id)
                .field("role", role)
                .finish(),
            Self::PeerRemoved { peer_id } => f
                .debug_struct("PeerRemoved")
                .field("peer_id", peer_id)
                .finish(),
            Self::Exchange { from, payload } => f
                .debug_struct("Exchange")
                .field("from", from)
                .field("payload", payload)
                .finish(),
            Self::IceConfig { ice_servers } => f
                .debug_struct("IceConfig")
                .field("ice_servers", ice_servers)
                .finish(),
        }
    }
}
