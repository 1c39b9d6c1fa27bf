use serde::{Deserialize, Serialize};
use std::fmt;

/// Логический канал поверх DataChannel пира.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(pub u16);

impl ChannelId {
    /// Трафик удаленной оболочки.
    pub const SHELL: ChannelId = ChannelId(3);
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Конверт любого сообщения по DataChannel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelPacket {
    pub id: ChannelId,
    pub data: serde_json::Value,
}

impl ChannelPacket {
    pub fn new(id: ChannelId, data: serde_json::Value) -> Self {
        Self { id, data }
    }
}
