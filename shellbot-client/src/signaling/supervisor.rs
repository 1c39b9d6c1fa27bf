use crate::config::SignalingConfig;
use crate::error::ClientResult;
use crate::session::SessionEvent;
use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Устанавливает одно сигнальное соединение и передает его события до обрыва.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    /// Возвращается, когда соединение закончилось. `Err`: не удалось или оборвалось.
    async fn connect(
        &self,
        config: &SignalingConfig,
        events: &mpsc::Sender<SessionEvent>,
    ) -> ClientResult<()>;
}

/// Держит ровно одну попытку подключения, активную или отложенную.
///
/// Неудачные и оборванные соединения повторяются через фиксированный интервал
/// без ограничения попыток, пока сессия принимает события.
pub struct ReconnectSupervisor<C> {
    connector: C,
    config: SignalingConfig,
    events: mpsc::Sender<SessionEvent>,
}

impl<C: Connector> ReconnectSupervisor<C> {
    pub fn new(connector: C, config: SignalingConfig, events: mpsc::Sender<SessionEvent>) -> Self {
        Self {
            connector,
            config,
            events,
        }
    }

    pub async fn run(self) {
        info!(
            url = %self.config.server_url,
            retry_ms = self.config.retry_interval.as_millis() as u64,
            protocol = self.config.protocol_version,
            "Reconnection supervisor started"
        );

        let mut attempt: u64 = 0;

        loop {
            attempt += 1;

            if self.events.send(SessionEvent::Connecting).await.is_err() {
                break;
            }

            match self.connector.connect(&self.config, &self.events).await {
                Ok(()) => info!(attempt, "Signaling connection closed"),
                Err(e) => warn!(attempt, "Signaling connection failed: {}", e),
            }

            if self.events.send(SessionEvent::TransportDropped).await.is_err() {
                break;
            }

            debug!("Reconnecting in {:?}", self.config.retry_interval);
            tokio::select! {
                _ = tokio::time::sleep(self.config.retry_interval) => {}
                _ = self.events.closed() => break,
            }
        }

        info!("Session is gone, reconnection supervisor stopped");
    }
}
