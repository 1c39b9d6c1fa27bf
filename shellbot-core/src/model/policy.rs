use crate::model::peer::PeerId;
use crate::model::role::ParticipantRole;
use serde::{Deserialize, Serialize};

/// Медиа в обе стороны, с точки зрения локального клиента.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaDirection {
    #[serde(rename = "in")]
    pub inbound: bool,
    #[serde(rename = "out")]
    pub outbound: bool,
}

impl MediaDirection {
    pub const OFF: Self = Self {
        inbound: false,
        outbound: false,
    };
    pub const RECEIVE: Self = Self {
        inbound: true,
        outbound: false,
    };
    pub const SEND: Self = Self {
        inbound: false,
        outbound: true,
    };

    pub fn is_enabled(&self) -> bool {
        self.inbound || self.outbound
    }
}

/// Разрешения каналов для упорядоченной пары участников.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelPolicy {
    pub data: bool,
    pub audio: MediaDirection,
    pub video: MediaDirection,
}

impl ChannelPolicy {
    pub const DENY: Self = Self {
        data: false,
        audio: MediaDirection::OFF,
        video: MediaDirection::OFF,
    };

    pub const DATA_ONLY: Self = Self {
        data: true,
        audio: MediaDirection::OFF,
        video: MediaDirection::OFF,
    };

    pub const DATA_RECEIVE_MEDIA: Self = Self {
        data: true,
        audio: MediaDirection::RECEIVE,
        video: MediaDirection::RECEIVE,
    };

    pub const DATA_SEND_MEDIA: Self = Self {
        data: true,
        audio: MediaDirection::SEND,
        video: MediaDirection::SEND,
    };

    pub fn has_media(&self) -> bool {
        self.audio.is_enabled() || self.video.is_enabled()
    }
}

/// Конкретный участник комнаты: серверный id и роль.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: PeerId,
    pub role: ParticipantRole,
}

impl Participant {
    pub fn new(id: PeerId, role: ParticipantRole) -> Self {
        Self { id, role }
    }
}

/// Сторона правила: целая роль или один конкретный пир.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Party {
    Role(ParticipantRole),
    Peer(PeerId),
}

impl Party {
    pub fn matches(&self, participant: &Participant) -> bool {
        match self {
            Party::Role(role) => *role == participant.role,
            Party::Peer(id) => *id == participant.id,
        }
    }
}

impl From<ParticipantRole> for Party {
    fn from(role: ParticipantRole) -> Self {
        Party::Role(role)
    }
}

impl From<PeerId> for Party {
    fn from(id: PeerId) -> Self {
        Party::Peer(id)
    }
}

/// `(from, to) -> policy`. На проводе: `[[from, to], policy]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RuleRepr", into = "RuleRepr")]
pub struct PolicyRule {
    pub from: Party,
    pub to: Party,
    pub policy: ChannelPolicy,
}

impl PolicyRule {
    pub fn new(from: impl Into<Party>, to: impl Into<Party>, policy: ChannelPolicy) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            policy,
        }
    }

    pub fn matches(&self, from: &Participant, to: &Participant) -> bool {
        self.from.matches(from) && self.to.matches(to)
    }
}

#[derive(Serialize, Deserialize)]
struct RuleRepr((Party, Party), ChannelPolicy);

impl From<RuleRepr> for PolicyRule {
    fn from(RuleRepr((from, to), policy): RuleRepr) -> Self {
        Self { from, to, policy }
    }
}

impl From<PolicyRule> for RuleRepr {
    fn from(rule: PolicyRule) -> Self {
        RuleRepr((rule.from, rule.to), rule.policy)
    }
}
