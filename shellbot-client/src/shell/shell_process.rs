use crate::config::ShellConfig;
use crate::error::{ClientError, ClientResult};
use bytes::Bytes;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Локальная интерактивная оболочка, одна на клиента.
///
/// stdout и stderr читаются построчно в общий канал вывода. Ввод идет
/// через отдельную задачу записи, так что полный pipe не блокирует отправителя.
pub struct ShellProcess {
    pid: Option<u32>,
    input: mpsc::UnboundedSender<Bytes>,
}

impl ShellProcess {
    pub fn spawn(config: &ShellConfig, output_tx: mpsc::Sender<String>) -> ClientResult<Self> {
        let mut child = Command::new(&config.program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ClientError::ShellSpawn {
                program: config.program.clone(),
                source,
            })?;

        let pid = child.id();
        info!("Shell '{}' started (pid {:?})", config.program, pid);

        let stdin = child.stdin.take().ok_or_else(|| ClientError::ShellSpawn {
            program: config.program.clone(),
            source: std::io::Error::other("stdin not captured"),
        })?;
        let (input, _writer) = spawn_input_writer(stdin);

        if let Some(stdout) = child.stdout.take() {
            tokio::spawn(forward_lines(BufReader::new(stdout), "stdout", output_tx.clone()));
        }
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(forward_lines(BufReader::new(stderr), "stderr", output_tx));
        }

        tokio::spawn(watch_exit(child, config.program.clone()));

        Ok(Self { pid, input })
    }

    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Очередь ввода оболочки. Порядок записей сохраняется.
    pub fn input(&self) -> mpsc::UnboundedSender<Bytes> {
        self.input.clone()
    }
}

/// Запускает задачу, которая пишет в `sink` все, что приходит в очередь.
///
/// Задача завершается, когда закрыты все отправители или запись упала.
pub fn spawn_input_writer<W>(sink: W) -> (mpsc::UnboundedSender<Bytes>, JoinHandle<()>)
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(write_input(sink, rx));
    (tx, task)
}

async fn write_input<W>(mut sink: W, mut rx: mpsc::UnboundedReceiver<Bytes>)
where
    W: AsyncWrite + Unpin,
{
    while let Some(bytes) = rx.recv().await {
        if let Err(e) = sink.write_all(&bytes).await {
            error!("Failed to write to shell input: {}", e);
            break;
        }
        if let Err(e) = sink.flush().await {
            error!("Failed to flush shell input: {}", e);
            break;
        }
    }
    debug!("Shell input writer finished");
}

async fn forward_lines<R>(reader: BufReader<R>, stream: &'static str, tx: mpsc::Sender<String>)
where
    R: AsyncRead + Unpin,
{
    let mut lines = reader.lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if tx.send(line).await.is_err() {
                    break;
                }
            }
            Ok(None) => {
                debug!("Shell {} closed", stream);
                break;
            }
            Err(e) => {
                warn!("Failed to read shell {}: {}", stream, e);
                break;
            }
        }
    }
}

async fn watch_exit(mut child: Child, program: String) {
    match child.wait().await {
        Ok(status) => warn!("Shell '{}' exited: {}", program, status),
        Err(e) => error!("Failed to wait for shell '{}': {}", program, e),
    }
}
