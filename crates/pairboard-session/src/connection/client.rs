//! Public handle for one relay connection.

use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};
use tracing::debug;

use super::task::connection_task;
use super::types::{ConnectionCommand, ConnectionConfig, ConnectionEvent};
use crate::protocol::WireMessage;

/// Handle to a background connection task.
///
/// All methods are non-blocking sends to the task. Cheap to clone via
/// [`ConnectionHandle::clone_sender`] for use from multiple tasks.
pub struct ConnectionHandle {
    command_tx: mpsc::Sender<ConnectionCommand>,
    connected: Arc<RwLock<bool>>,
}

impl ConnectionHandle {
    /// Open the transport. Spawns exactly one connection task per call and
    /// returns `(handle, event_receiver)`.
    pub fn open(config: ConnectionConfig) -> (Self, mpsc::Receiver<ConnectionEvent>) {
        let (event_tx, event_rx) = mpsc::channel(256);
        let (command_tx, command_rx) = mpsc::channel(64);
        let connected = Arc::new(RwLock::new(false));

        let handle = Self {
            command_tx,
            connected: Arc::clone(&connected),
        };

        tokio::spawn(connection_task(config, connected, event_tx, command_rx));

        (handle, event_rx)
    }

    /// Clone the command sender for a lightweight handle to the same
    /// connection.
    pub fn clone_sender(&self) -> Self {
        Self {
            command_tx: self.command_tx.clone(),
            connected: Arc::clone(&self.connected),
        }
    }

    /// Queue a message for transmission. Silently a no-op when the
    /// transport is not connected; message loss is tolerated by the sync
    /// model (the next edit resynchronizes).
    pub async fn send(&self, message: WireMessage) {
        if !*self.connected.read().await {
            debug!("dropping outbound message while disconnected");
            return;
        }
        let _ = self.command_tx.send(ConnectionCommand::Send(message)).await;
    }

    pub async fn is_connected(&self) -> bool {
        *self.connected.read().await
    }

    /// Close the transport. Safe to call repeatedly or when never opened.
    pub async fn disconnect(&self) {
        let _ = self.command_tx.send(ConnectionCommand::Disconnect).await;
    }
}
