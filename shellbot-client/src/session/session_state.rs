use shellbot_core::PeerId;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Disconnected,
    Connecting,
    Handshaking,
    Joined,
    Terminated,
}

/// Состояние сигнального соединения на весь процесс. Меняет его только цикл сессии.
#[derive(Debug, Default)]
pub struct ConnectionSession {
    state: SessionState,
    local_id: Option<PeerId>,
}

impl ConnectionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Id, выданный сервером на текущем соединении.
    pub fn local_id(&self) -> Option<&PeerId> {
        self.local_id.as_ref()
    }

    pub fn is_terminated(&self) -> bool {
        self.state == SessionState::Terminated
    }

    pub(crate) fn connecting(&mut self) {
        self.transition(SessionState::Connecting);
    }

    pub(crate) fn handshake_completed(&mut self, local_id: PeerId) {
        if self.is_terminated() {
            return;
        }
        self.local_id = Some(local_id);
        self.transition(SessionState::Handshaking);
    }

    pub(crate) fn joined(&mut self) {
        self.transition(SessionState::Joined);
    }

    pub(crate) fn dropped(&mut self) {
        if self.is_terminated() {
            return;
        }
        self.local_id = None;
        self.transition(SessionState::Disconnected);
    }

    pub(crate) fn terminate(&mut self) {
        self.transition(SessionState::Terminated);
    }

    fn transition(&mut self, next: SessionState) {
        if self.is_terminated() || self.state == next {
            return;
        }
        debug!("Session state {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
