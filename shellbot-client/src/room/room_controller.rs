use crate::config::RoomConfig;
use crate::policy::RuleSet;
use crate::room::room_handle::RoomHandle;
use crate::signaling::SignalingCommands;
use shellbot_core::{PeerId, RoomId};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Поиск комнаты и вход в нее для одного робота.
///
/// После каждого рукопожатия комната опрашивается, пока сервер ее не найдет.
/// Вход выполняется один раз, при входе отправляется набор правил робота.
pub struct RoomController {
    config: RoomConfig,
    handle: Option<RoomHandle>,
    join_requested: bool,
    pending_read: Option<JoinHandle<()>>,
}

impl RoomController {
    pub fn new(config: RoomConfig) -> Self {
        Self {
            config,
            handle: None,
            join_requested: false,
            pending_read: None,
        }
    }

    pub fn room_name(&self) -> &str {
        &self.config.room_name
    }

    pub fn handle(&self) -> Option<&RoomHandle> {
        self.handle.as_ref()
    }

    pub fn has_pending_read(&self) -> bool {
        self.pending_read
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    pub async fn on_handshake(&mut self, commands: &Arc<dyn SignalingCommands>) {
        self.cancel_pending_read();
        self.join_requested = false;

        info!("Looking up room '{}'", self.config.room_name);
        if let Err(e) = commands.read_room(&self.config.room_name).await {
            warn!("Failed to request room '{}': {}", self.config.room_name, e);
        }
    }

    pub async fn on_room_read(&mut self, id: Option<RoomId>, commands: &Arc<dyn SignalingCommands>) {
        let Some(id) = id else {
            debug!(
                "Room '{}' does not exist yet, checking again in {:?}",
                self.config.room_name, self.config.poll_interval
            );
            self.schedule_read(commands.clone());
            return;
        };

        if self.join_requested {
            debug!("Join for room {} already requested", id);
            return;
        }

        self.cancel_pending_read();
        self.join_requested = true;

        info!("Room {} found, joining as robot {}", id, self.config.robot_id);
        if let Err(e) = commands.robot_join(self.config.join_request()).await {
            error!("Failed to send join request for room {}: {}", id, e);
        }
    }

    /// Запоминает вход и отправляет набор правил для `local_id`.
    pub async fn on_joined(
        &mut self,
        room_id: RoomId,
        local_id: &PeerId,
        commands: &Arc<dyn SignalingCommands>,
    ) -> RuleSet {
        info!("Joined room {} as {}", room_id, local_id);

        match self.handle.as_mut() {
            Some(handle) if *handle.room_id() == room_id => handle.set_joined(true),
            _ => self.handle = Some(RoomHandle::new(room_id)),
        }

        let rules = RuleSet::robot(local_id);
        if let Err(e) = commands.add_rule_set(rules.rules().to_vec()).await {
            error!("Failed to install rule set: {}", e);
        }
        rules
    }

    pub fn on_transport_dropped(&mut self) {
        self.cancel_pending_read();
        self.join_requested = false;
        if let Some(handle) = self.handle.as_mut() {
            handle.set_joined(false);
        }
    }

    pub fn on_removed(&mut self) {
        self.cancel_pending_read();
        self.handle = None;
    }

    fn schedule_read(&mut self, commands: Arc<dyn SignalingCommands>) {
        self.cancel_pending_read();

        let name = self.config.room_name.clone();
        let delay = self.config.poll_interval;

        self.pending_read = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = commands.read_room(&name).await {
                warn!("Failed to request room '{}': {}", name, e);
            }
        }));
    }

    fn cancel_pending_read(&mut self) {
        if let Some(task) = self.pending_read.take() {
            task.abort();
        }
    }
}

impl Drop for RoomController {
    fn drop(&mut self) {
        self.cancel_pending_read();
    }
}
