//! Background WebSocket task: one connect attempt, then a read loop.

use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, Mutex, RwLock};
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tracing::{error, info, warn};

use super::types::{ConnectionCommand, ConnectionConfig, ConnectionEvent};
use crate::protocol::WireMessage;

/// Connect once and pump frames until the transport ends. There is no
/// reconnect here: a dropped connection stays down until the owning
/// session opens a new one.
pub(crate) async fn connection_task(
    config: ConnectionConfig,
    connected: Arc<RwLock<bool>>,
    event_tx: mpsc::Sender<ConnectionEvent>,
    command_rx: mpsc::Receiver<ConnectionCommand>,
) {
    let url = config.ws_url();
    info!(url = %url, "connecting to room relay");

    match tokio::time::timeout(
        Duration::from_secs(config.connect_timeout_secs),
        tokio_tungstenite::connect_async(&url),
    )
    .await
    {
        Ok(Ok((ws_stream, _))) => {
            *connected.write().await = true;
            let _ = event_tx.send(ConnectionEvent::Open).await;

            let (ws_write, mut ws_read) = ws_stream.split();
            let ws_write = Arc::new(Mutex::new(ws_write));

            let cmd_handle = tokio::spawn(command_forwarder(command_rx, Arc::clone(&ws_write)));

            while let Some(frame) = ws_read.next().await {
                match frame {
                    Ok(WsMessage::Text(text)) => {
                        // Undecodable frames are dropped inside decode();
                        // a single corrupt frame must not end the session.
                        if let Some(msg) = WireMessage::decode(&text) {
                            let _ = event_tx.send(ConnectionEvent::Message(msg)).await;
                        }
                    }
                    Ok(WsMessage::Close(_)) => {
                        info!(room = %config.room_code, "relay closed the connection");
                        break;
                    }
                    Err(e) => {
                        warn!(error = %e, "websocket error");
                        let _ = event_tx.send(ConnectionEvent::Error(e.to_string())).await;
                        break;
                    }
                    _ => {}
                }
            }

            cmd_handle.abort();
            *connected.write().await = false;
            let _ = event_tx.send(ConnectionEvent::Closed).await;
        }
        Ok(Err(e)) => {
            error!(error = %e, "failed to connect to room relay");
            let _ = event_tx
                .send(ConnectionEvent::Error(format!("connection failed: {e}")))
                .await;
            let _ = event_tx.send(ConnectionEvent::Closed).await;
        }
        Err(_elapsed) => {
            error!(
                timeout = config.connect_timeout_secs,
                "relay connection timed out"
            );
            let _ = event_tx
                .send(ConnectionEvent::Error(format!(
                    "connection timed out after {}s",
                    config.connect_timeout_secs
                )))
                .await;
            let _ = event_tx.send(ConnectionEvent::Closed).await;
        }
    }
}

/// Forwards handle commands to the write half of the socket.
async fn command_forwarder<S>(mut command_rx: mpsc::Receiver<ConnectionCommand>, write: Arc<Mutex<S>>)
where
    S: futures_util::Sink<WsMessage> + Unpin,
{
    while let Some(cmd) = command_rx.recv().await {
        match cmd {
            ConnectionCommand::Send(msg) => {
                if let Ok(json) = msg.encode() {
                    let mut writer = write.lock().await;
                    let _ = writer.send(WsMessage::Text(json.into())).await;
                }
            }
            ConnectionCommand::Disconnect => {
                let mut writer = write.lock().await;
                let _ = writer.send(WsMessage::Close(None)).await;
                return;
            }
        }
    }
}
