use crate::error::{ClientError, ClientResult};
use crate::transport::PeerChannels;
use bytes::Bytes;
use shellbot_core::{ChannelId, PeerId, ShellMessage};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

/// Мост между протоколом удаленной оболочки и локальным shell.
///
/// Ввод не пишется в pipe напрямую: байты уходят в очередь задачи записи,
/// поэтому цикл сессии никогда не ждет занятую оболочку.
pub struct ShellBridge {
    plugin_id: String,
    input: mpsc::UnboundedSender<Bytes>,
}

impl ShellBridge {
    pub fn new(plugin_id: impl Into<String>, input: mpsc::UnboundedSender<Bytes>) -> Self {
        Self {
            plugin_id: plugin_id.into(),
            input,
        }
    }

    pub async fn handle_message(
        &self,
        peer_id: &PeerId,
        message: ShellMessage,
        channels: &dyn PeerChannels,
    ) -> ClientResult<()> {
        match message {
            ShellMessage::Line { args, .. } => {
                let Some(text) = args.into_iter().next() else {
                    debug!("Empty line command from {}", peer_id);
                    return Ok(());
                };
                self.write(Bytes::from(format!("{text}\n")))
            }

            ShellMessage::Key { args } => {
                let Some(keys) = args.into_iter().next() else {
                    debug!("Empty key command from {}", peer_id);
                    return Ok(());
                };
                self.write(Bytes::from(keys))
            }

            ShellMessage::Init => {
                info!("Shell viewer {} connected", peer_id);
                let reply = serde_json::to_value(ShellMessage::init_ok(&self.plugin_id))?;
                channels.send(ChannelId::SHELL, Some(peer_id), reply).await;
                Ok(())
            }

            ShellMessage::InitOk { .. } | ShellMessage::Unknown => Ok(()),
        }
    }

    /// Рассылает строку вывода всем подключенным пирам.
    pub async fn forward_output(&self, line: &str, channels: &dyn PeerChannels) {
        info!("{}", line);

        if channels.list_peer_ids().is_empty() {
            return;
        }

        match serde_json::to_value(ShellMessage::output(line, &self.plugin_id)) {
            Ok(payload) => channels.send(ChannelId::SHELL, None, payload).await,
            Err(e) => error!("Failed to encode shell output: {}", e),
        }
    }

    fn write(&self, bytes: Bytes) -> ClientResult<()> {
        self.input
            .send(bytes)
            .map_err(|_| ClientError::ShellInputClosed)
    }
}
