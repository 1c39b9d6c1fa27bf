use anyhow::{Result, bail};
use clap::Parser;
use colored::*;
use shellbot_client::{ClientConfig, SessionOutcome, TransportConfig, run_client};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: shellbot [ROOM NAME] (SIGNAL SERVER)";

/// Joins a room as a robot and serves a remote shell to its peers.
#[derive(Parser, Debug)]
#[command(name = "shellbot", version)]
struct Cli {
    /// Room to join.
    room_name: Option<String>,

    /// Signaling server host, reached over https. Defaults to http://localhost:4010.
    signal_server: Option<String>,

    #[arg(long, default_value_t = 1000)]
    retry_interval_ms: u64,

    #[arg(long, default_value_t = 4)]
    protocol_version: u32,

    #[arg(long, default_value_t = 3000)]
    room_poll_ms: u64,

    /// Shell program. Defaults to $SHELL, then /bin/sh.
    #[arg(long)]
    shell: Option<String>,

    #[arg(long, default_value = "nisdos/terminal")]
    plugin_id: String,

    /// STUN server url, may be repeated.
    #[arg(long = "stun")]
    stun: Vec<String>,
}

impl Cli {
    fn into_config(self, room_name: String) -> ClientConfig {
        let mut config = ClientConfig::new(room_name, self.signal_server.as_deref());

        config.signaling.retry_interval = Duration::from_millis(self.retry_interval_ms);
        config.signaling.protocol_version = self.protocol_version;
        config.room.poll_interval = Duration::from_millis(self.room_poll_ms);
        config.shell.plugin_id = self.plugin_id;
        if let Some(shell) = self.shell {
            config.shell.program = shell;
        }
        if !self.stun.is_empty() {
            config.transport = TransportConfig::with_stun_urls(self.stun);
        }

        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut cli = Cli::parse();

    let Some(room_name) = cli.room_name.take() else {
        println!("{}", USAGE.yellow());
        return Ok(());
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("{}", format!("Connecting to room {room_name}...").cyan());

    let config = cli.into_config(room_name);
    info!(
        server = %config.signaling.server_url,
        shell = %config.shell.program,
        "Starting robot client"
    );

    match run_client(config).await? {
        SessionOutcome::RoomRemoved => {
            println!("{}", "Room removed, exiting.".green());
            Ok(())
        }
        outcome => bail!("session ended unexpectedly: {:?}", outcome),
    }
}
