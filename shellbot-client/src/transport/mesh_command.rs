use crate::policy::RuleSet;
use crate::signaling::SignalingCommands;
use shellbot_core::{ExchangePayload, IceServerConfig, Participant, ParticipantRole, PeerId};
use std::sync::Arc;

/// Команды, поступающие в сетку пиров от цикла сессии.
pub enum MeshCommand {
    /// Новое соединение с сигнальным сервером: ответы и ICE идут через него.
    AttachSignaling(Arc<dyn SignalingCommands>),

    /// Соединение с сервером потеряно.
    DetachSignaling,

    /// Робот вошел в комнату, правила установлены.
    InstallRules { local: Participant, rules: RuleSet },

    PeerUpdate { peer_id: PeerId, role: ParticipantRole },

    PeerRemoved { peer_id: PeerId },

    /// SDP Offer / ICE от удаленного пира.
    Exchange { from: PeerId, payload: ExchangePayload },

    IceConfig { ice_servers: Vec<IceServerConfig> },
}
