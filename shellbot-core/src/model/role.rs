use serde::{Deserialize, Serialize};
use std::fmt;

/// Класс участника комнаты, его назначает сигнальный сервер.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ParticipantRole {
    Host,
    User,
    Robot,
}

impl ParticipantRole {
    pub const ALL: [ParticipantRole; 3] = [Self::Host, Self::User, Self::Robot];

    pub fn code(self) -> u8 {
        match self {
            Self::Host => 1,
            Self::User => 2,
            Self::Robot => 3,
        }
    }
}

impl From<ParticipantRole> for u8 {
    fn from(role: ParticipantRole) -> Self {
        role.code()
    }
}

impl TryFrom<u8> for ParticipantRole {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Host),
            2 => Ok(Self::User),
            3 => Ok(Self::Robot),
            other => Err(format!("unknown participant role {other}")),
        }
    }
}

impl fmt::Display for ParticipantRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Host => "HOST",
            Self::User => "USER",
            Self::Robot => "ROBOT",
        };
        f.write_str(name)
    }
}
