use crate::model::peer::PeerId;
use crate::model::policy::PolicyRule;
use crate::model::role::ParticipantRole;
use crate::model::room::{RobotJoin, RoomId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    pub username: Option<String>,
    pub credential: Option<String>,
}

/// Кадр сигнального канала. На проводе: `{"op": ..., "d": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "op",
    content = "d",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum SignalMessage {
    /// client -> server, первым кадром после открытия сокета.
    Hello { proto_version: u32 },

    /// server -> client, рукопожатие завершено, выдан id.
    Welcome { peer_id: PeerId },

    ReadRoom { name: String },

    /// `id == None`: комнаты пока нет.
    RoomRead {
        #[serde(default)]
        id: Option<RoomId>,
    },

    RobotJoin(RobotJoin),

    JoinedRoom { room_id: RoomId },

    AddRuleSet { rules: Vec<PolicyRule> },

    RoomRemoved,

    PeerUpdate { peer_id: PeerId, role: ParticipantRole },

    PeerRemoved { peer_id: PeerId },

    /// SDP/ICE между пирами. От клиента `peer_id` это получатель, от сервера отправитель.
    Exchange {
        peer_id: PeerId,
        payload: ExchangePayload,
    },

    IceConfig { ice_servers: Vec<IceServerConfig> },

    Error { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ExchangePayload {
    Offer {
        sdp: String,
    },
    Answer {
        sdp: String,
    },
    IceCandidate {
        candidate: String,
        sdp_mid: Option<String>,
        sdp_m_line_index: Option<u16>,
    },
}
