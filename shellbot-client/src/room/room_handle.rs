use shellbot_core::RoomId;

/// Комната, в которую вошел робот.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomHandle {
    room_id: RoomId,
    joined: bool,
}

impl RoomHandle {
    pub(crate) fn new(room_id: RoomId) -> Self {
        Self {
            room_id,
            joined: true,
        }
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn is_joined(&self) -> bool {
        self.joined
    }

    pub(crate) fn set_joined(&mut self, joined: bool) {
        self.joined = joined;
    }
}
