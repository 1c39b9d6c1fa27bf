use serde::{Deserialize, Serialize};

/// Протокол удаленной оболочки на канале [`ChannelId::SHELL`](crate::ChannelId::SHELL).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "kebab-case")]
pub enum ShellMessage {
    /// Введенная строка, перевод строки добавляет получатель.
    Line {
        #[serde(default)]
        args: Vec<String>,
        #[serde(
            rename = "pluginId",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        plugin_id: Option<String>,
    },

    /// Нажатия клавиш, передаются как есть.
    Key {
        #[serde(default)]
        args: Vec<String>,
    },

    /// Зритель проверяет готовность оболочки.
    Init,

    /// Ответ на [`ShellMessage::Init`].
    InitOk {
        #[serde(rename = "pluginId")]
        plugin_id: String,
    },

    #[serde(other)]
    Unknown,
}

impl ShellMessage {
    pub fn output(line: impl Into<String>, plugin_id: impl Into<String>) -> Self {
        Self::Line {
            args: vec![line.into()],
            plugin_id: Some(plugin_id.into()),
        }
    }

    pub fn init_ok(plugin_id: impl Into<String>) -> Self {
        Self::InitOk {
            plugin_id: plugin_id.into(),
        }
    }
}
