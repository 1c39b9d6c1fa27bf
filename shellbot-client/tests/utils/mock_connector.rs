use async_trait::async_trait;
use shellbot_client::{ClientError, ClientResult, Connector, SessionEvent, SignalingConfig};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tokio::time::Instant;

#[derive(Debug, Clone, Copy)]
pub struct ConnectAttempt {
    pub at: Instant,
    pub protocol_version: u32,
}

/// Connector that never reaches a server and records every attempt.
#[derive(Clone, Default)]
pub struct MockConnector {
    attempts: Arc<Mutex<Vec<ConnectAttempt>>>,
}

impl MockConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn attempts(&self) -> Vec<ConnectAttempt> {
        self.attempts.lock().await.clone()
    }
}

#[async_trait]
impl Connector for MockConnector {
    async fn connect(
        &self,
        config: &SignalingConfig,
        _events: &mpsc::Sender<SessionEvent>,
    ) -> ClientResult<()> {
        self.attempts.lock().await.push(ConnectAttempt {
            at: Instant::now(),
            protocol_version: config.protocol_version,
        });
        Err(ClientError::LinkClosed)
    }
}
