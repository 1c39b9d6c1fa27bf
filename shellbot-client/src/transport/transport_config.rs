use shellbot_core::IceServerConfig;

/// Конфигурация для WebRTC
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub ice_servers: Vec<IceServerConfig>,
}

impl TransportConfig {
    pub fn with_stun_urls(urls: Vec<String>) -> Self {
        Self {
            ice_servers: vec![IceServerConfig {
                urls,
                username: None,
                credential: None,
            }],
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::with_stun_urls(vec!["stun:stun.l.google.com:19302".to_owned()])
    }
}
