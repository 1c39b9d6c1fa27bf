use shellbot_core::{ChannelPolicy, Participant, ParticipantRole, PeerId, PolicyRule};

/// Упорядоченный список правил. Побеждает первое правило для пары `(from, to)`,
/// пара без правила получает [`ChannelPolicy::DENY`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    rules: Vec<PolicyRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<PolicyRule>) -> Self {
        Self { rules }
    }

    /// Правила, которые робот ставит после входа, по его серверному id.
    /// Правила с `local_id` перекрывают правила для ролей.
    pub fn robot(local_id: &PeerId) -> Self {
        use ParticipantRole::{Host, Robot, User};

        let me = || local_id.clone();

        Self::new(vec![
            PolicyRule::new(Host, Host, ChannelPolicy::DATA_ONLY),
            PolicyRule::new(Host, User, ChannelPolicy::DATA_ONLY),
            PolicyRule::new(User, Host, ChannelPolicy::DATA_ONLY),
            PolicyRule::new(me(), Host, ChannelPolicy::DATA_RECEIVE_MEDIA),
            PolicyRule::new(Host, me(), ChannelPolicy::DATA_SEND_MEDIA),
            PolicyRule::new(me(), User, ChannelPolicy::DATA_SEND_MEDIA),
            PolicyRule::new(User, me(), ChannelPolicy::DATA_RECEIVE_MEDIA),
            PolicyRule::new(me(), Robot, ChannelPolicy::DATA_SEND_MEDIA),
        ])
    }

    pub fn resolve(&self, from: &Participant, to: &Participant) -> ChannelPolicy {
        self.rules
            .iter()
            .find(|rule| rule.matches(from, to))
            .map(|rule| rule.policy)
            .unwrap_or(ChannelPolicy::DENY)
    }

    pub fn rules(&self) -> &[PolicyRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
