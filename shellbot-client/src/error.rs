use thiserror::Error;
use tokio_tungstenite::tungstenite;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("signaling socket error: {0}")]
    Socket(#[from] Box<tungstenite::Error>),

    #[error("failed to encode or decode a frame: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("shell input closed")]
    ShellInputClosed,

    #[error("signaling link closed")]
    LinkClosed,

    #[error("failed to spawn shell `{program}`: {source}")]
    ShellSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("session event channel closed")]
    EventsClosed,
}

impl From<tungstenite::Error> for ClientError {
    fn from(e: tungstenite::Error) -> Self {
        Self::Socket(Box::new(e))
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
