use crate::error::ClientResult;
use async_trait::async_trait;
use shellbot_core::{ExchangePayload, PeerId, PolicyRule, RobotJoin, SignalMessage};

/// Команды, которые сессия отправляет сигнальному серверу.
///
/// Реализация привязана к одному соединению: после обрыва старая ручка
/// возвращает ошибку, новая приходит с событием следующего рукопожатия.
#[async_trait]
pub trait SignalingCommands: Send + Sync {
    /// Отправить кадр как есть.
    async fn send(&self, message: SignalMessage) -> ClientResult<()>;

    async fn read_room(&self, name: &str) -> ClientResult<()> {
        self.send(SignalMessage::ReadRoom {
            name: name.to_owned(),
        })
        .await
    }

    async fn robot_join(&self, request: RobotJoin) -> ClientResult<()> {
        self.send(SignalMessage::RobotJoin(request)).await
    }

    async fn add_rule_set(&self, rules: Vec<PolicyRule>) -> ClientResult<()> {
        self.send(SignalMessage::AddRuleSet { rules }).await
    }

    async fn exchange(&self, peer_id: PeerId, payload: ExchangePayload) -> ClientResult<()> {
        self.send(SignalMessage::Exchange { peer_id, payload }).await
    }
}
