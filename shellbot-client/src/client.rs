use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::session::{Session, SessionIo, SessionOutcome};
use crate::shell::{ShellBridge, ShellProcess};
use crate::signaling::{ReconnectSupervisor, WsConnector};
use crate::transport::PeerMesh;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

/// Запускает робота до удаления его комнаты.
///
/// Поднимает оболочку, сетку пиров и супервизор переподключения, а цикл
/// сессии крутит в текущей задаче.
pub async fn run_client(config: ClientConfig) -> ClientResult<SessionOutcome> {
    let ClientConfig {
        signaling,
        room,
        shell,
        transport,
    } = config;

    let (output_tx, output_rx) = mpsc::channel(256);
    let process = ShellProcess::spawn(&shell, output_tx)?;

    let (events_tx, events_rx) = mpsc::channel(256);
    let (mesh_tx, mesh_rx) = mpsc::channel(256);
    let (message_tx, message_rx) = mpsc::channel(256);

    let mesh = PeerMesh::new(mesh_rx, message_tx, transport);
    let channels = Arc::new(mesh.context());
    let mesh_task = tokio::spawn(mesh.run());

    let supervisor = ReconnectSupervisor::new(WsConnector, signaling, events_tx);
    let supervisor_task = tokio::spawn(supervisor.run());

    let bridge = ShellBridge::new(shell.plugin_id, process.input());

    let session = Session::new(
        room,
        bridge,
        channels,
        mesh_tx,
        SessionIo {
            events: events_rx,
            peer_messages: message_rx,
            shell_output: output_rx,
        },
    );

    let outcome = session.run().await;

    supervisor_task.abort();
    let _ = mesh_task.await;
    info!("Client stopped: {:?}", outcome);

    Ok(outcome)
}
