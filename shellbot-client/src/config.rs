use crate::transport::TransportConfig;
use shellbot_core::{JoinOptions, RobotJoin, RoomId};
use std::time::Duration;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:4010";
pub const DEFAULT_PLUGIN_ID: &str = "nisdos/terminal";
pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Параметры подключения к сигнальному серверу.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalingConfig {
    pub server_url: String,
    pub retry_interval: Duration,
    pub protocol_version: u32,
}

impl Default for SignalingConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_owned(),
            retry_interval: Duration::from_millis(1000),
            protocol_version: 4,
        }
    }
}

impl SignalingConfig {
    /// Хост всегда идет через `https`. Без хоста используется локальный сервер.
    pub fn for_host(host: Option<&str>) -> Self {
        let server_url = match host {
            Some(host) => format!("https://{host}"),
            None => DEFAULT_SERVER_URL.to_owned(),
        };
        Self {
            server_url,
            ..Self::default()
        }
    }

    pub fn ws_url(&self) -> String {
        if let Some(rest) = self.server_url.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = self.server_url.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            self.server_url.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoomConfig {
    pub room_name: String,
    pub poll_interval: Duration,
    pub robot_id: u32,
    pub connect_key: String,
    pub options: JoinOptions,
}

impl RoomConfig {
    pub fn new(room_name: impl Into<String>) -> Self {
        Self {
            room_name: room_name.into(),
            poll_interval: Duration::from_millis(3000),
            robot_id: 1,
            connect_key: String::new(),
            options: JoinOptions {
                removable: false,
                singleton: true,
            },
        }
    }

    pub fn join_request(&self) -> RobotJoin {
        RobotJoin {
            room_id: RoomId(self.room_name.clone()),
            robot_id: self.robot_id,
            connect_key: self.connect_key.clone(),
            options: self.options,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShellConfig {
    pub program: String,
    pub plugin_id: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            program: std::env::var("SHELL").unwrap_or_else(|_| DEFAULT_SHELL.to_owned()),
            plugin_id: DEFAULT_PLUGIN_ID.to_owned(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub signaling: SignalingConfig,
    pub room: RoomConfig,
    pub shell: ShellConfig,
    pub transport: TransportConfig,
}

impl ClientConfig {
    pub fn new(room_name: impl Into<String>, host: Option<&str>) -> Self {
        Self {
            signaling: SignalingConfig::for_host(host),
            room: RoomConfig::new(room_name),
            shell: ShellConfig::default(),
            transport: TransportConfig::default(),
        }
    }
}
