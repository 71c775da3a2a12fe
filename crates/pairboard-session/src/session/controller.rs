//! The session controller: the UI's single entry point into a room.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use pairboard_api::RoomApiClient;
use pairboard_common::{ParticipantRole, ValidationError};
use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::connection::{ConnectionConfig, ConnectionHandle, ConnectionState};
use crate::error::SessionError;
use crate::identity::Identity;
use crate::monitoring::{
    keystroke_pump, AlertLog, FocusTracker, KeyModifiers, KeystrokeReport, MonitoringAlert,
};
use crate::presence::{CursorRegistry, RemoteCursor};
use crate::protocol::WireMessage;
use crate::sync::{EditorSync, LocalOutcome};

use super::translator::event_translator;
use super::types::{RoomSession, SessionConfig, SessionEvent, SessionState};

/// Owns one live room session end to end.
///
/// [`RoomSessionController::start`] fetches the authoritative room snapshot
/// over REST, opens the relay connection, and spawns the background tasks
/// that keep the session state current. The UI drives the controller with
/// its methods and reacts to the [`SessionEvent`] stream returned alongside
/// it. There is no automatic reconnect: when the transport drops, the
/// session stays down until a new controller is started.
pub struct RoomSessionController {
    config: SessionConfig,
    api: RoomApiClient,
    state: Arc<RwLock<SessionState>>,
    connection: ConnectionHandle,
    event_tx: mpsc::Sender<SessionEvent>,
    /// Present on the candidate side only.
    key_tx: Option<mpsc::Sender<(String, KeyModifiers)>>,
    tasks: Vec<JoinHandle<()>>,
}

impl RoomSessionController {
    /// Start a session for an existing room.
    ///
    /// Fails with a typed error when the room cannot be fetched (unknown
    /// code, backend down); the relay connection itself is opened in the
    /// background and reports through the event stream instead.
    pub async fn start(
        config: SessionConfig,
        api: RoomApiClient,
    ) -> Result<(Self, mpsc::Receiver<SessionEvent>), SessionError> {
        let info = api.room_info(&config.room_code).await?;
        info!(room = %config.room_code, role = %config.role, "starting room session");

        let (event_tx, event_rx) = mpsc::channel(256);

        let state = Arc::new(RwLock::new(SessionState {
            room: RoomSession {
                info: info.clone(),
                language: "python".to_string(),
                connection: ConnectionState::Connecting,
            },
            sync: EditorSync::with_baseline(&info.editor_content),
            cursors: CursorRegistry::default(),
            alerts: AlertLog::new(config.alert_log_capacity),
            focus: FocusTracker::new(Duration::from_millis(config.focus_threshold_ms)),
            closed: false,
        }));

        // Seed the UI with the REST snapshot before any relay traffic.
        let _ = event_tx.send(SessionEvent::RoomInfoChanged(info)).await;

        let relay_base = config
            .relay_url
            .clone()
            .unwrap_or_else(|| api.config().base_url.clone());
        let (connection, conn_rx) =
            ConnectionHandle::open(ConnectionConfig::new(&relay_base, config.room_code.clone()));

        let mut tasks = Vec::new();
        tasks.push(tokio::spawn(event_translator(
            conn_rx,
            Arc::clone(&state),
            event_tx.clone(),
            connection.clone_sender(),
            config.identity.user_id.clone(),
            config.role,
        )));

        // Keystroke reporting runs on the candidate side only.
        let key_tx = if config.role == ParticipantRole::Candidate {
            let (key_tx, keys_rx) = mpsc::channel(64);
            let (reports_tx, reports_rx) = mpsc::channel(64);
            tasks.push(tokio::spawn(keystroke_pump(
                keys_rx,
                reports_tx,
                Duration::from_millis(config.keystroke_quiet_ms),
            )));
            tasks.push(tokio::spawn(report_forwarder(
                reports_rx,
                connection.clone_sender(),
                config.identity.clone(),
            )));
            Some(key_tx)
        } else {
            None
        };

        let controller = Self {
            config,
            api,
            state,
            connection,
            event_tx,
            key_tx,
            tasks,
        };
        Ok((controller, event_rx))
    }

    // -----------------------------------------------------------------------
    // Editor
    // -----------------------------------------------------------------------

    /// Record a user-typed buffer change and broadcast it when it differs
    /// from the last applied content. Programmatic changes (those made in
    /// response to [`SessionEvent::EditorContentReplaced`]) must not be fed
    /// through here.
    pub async fn local_edit(&self, content: &str) {
        let outgoing = {
            let mut state = self.state.write().await;
            if state.closed {
                debug!("dropping local edit after room close");
                return;
            }
            match state.sync.local_edit(content) {
                LocalOutcome::Send { content } => {
                    state.room.info.editor_content = content.clone();
                    Some(content)
                }
                LocalOutcome::Unchanged => None,
            }
        };

        if let Some(content) = outgoing {
            self.connection
                .send(WireMessage::EditorUpdate {
                    content,
                    user_id: self.config.identity.user_id.clone(),
                    user_name: self.config.identity.display_name.clone(),
                    cursor_position: None,
                    timestamp: Some(Utc::now().to_rfc3339()),
                })
                .await;
        }
    }

    /// Broadcast the local cursor position. Positions are opaque to the
    /// session layer; whatever shape the editor produces is relayed as is.
    pub async fn cursor_moved(&self, position: serde_json::Value) {
        if self.state.read().await.closed {
            return;
        }
        self.connection
            .send(WireMessage::CursorUpdate {
                user_id: self.config.identity.user_id.clone(),
                user_name: self.config.identity.display_name.clone(),
                cursor_position: position,
                timestamp: Some(Utc::now().to_rfc3339()),
            })
            .await;
    }

    /// Set the local editor language hint. Display-only, not synchronized.
    pub async fn set_language(&self, language: &str) {
        self.state.write().await.room.language = language.to_string();
    }

    // -----------------------------------------------------------------------
    // Monitoring inputs (candidate side)
    // -----------------------------------------------------------------------

    /// Feed one keydown into the debounced keystroke reporter. No-op on the
    /// interviewer side.
    pub async fn key_pressed(&self, key: &str, modifiers: KeyModifiers) {
        if let Some(tx) = &self.key_tx {
            let _ = tx.send((key.to_string(), modifiers)).await;
        }
    }

    /// The session window lost focus. No-op on the interviewer side.
    pub async fn window_blurred(&self) {
        if self.config.role != ParticipantRole::Candidate {
            return;
        }
        {
            let mut state = self.state.write().await;
            if state.closed {
                return;
            }
            state.focus.blur(Instant::now());
        }
        let _ = self.event_tx.send(SessionEvent::FocusWarning).await;
    }

    /// The session window regained focus. Reports the absence upstream when
    /// it lasted past the threshold; short flickers are dropped. No-op on
    /// the interviewer side.
    pub async fn window_focused(&self) {
        if self.config.role != ParticipantRole::Candidate {
            return;
        }
        let (was_blurred, reportable) = {
            let mut state = self.state.write().await;
            let was_blurred = state.focus.is_blurred();
            (was_blurred, state.focus.focus(Instant::now()))
        };

        if let Some(duration) = reportable {
            info!(duration, "reporting focus loss");
            self.connection
                .send(WireMessage::WindowFocusLost {
                    user_id: self.config.identity.user_id.clone(),
                    user_name: self.config.identity.display_name.clone(),
                    duration,
                })
                .await;
        }
        if was_blurred {
            let _ = self.event_tx.send(SessionEvent::FocusRegained).await;
        }
    }

    // -----------------------------------------------------------------------
    // Room lifecycle
    // -----------------------------------------------------------------------

    /// Close the room for everyone. Interviewer only; the backend fans a
    /// `room_closed` message out to all participants, which is what drives
    /// this session's own terminal event.
    pub async fn close_room(&self) -> Result<(), SessionError> {
        if self.config.role != ParticipantRole::Interviewer {
            return Err(ValidationError::RoleRequired(ParticipantRole::Interviewer).into());
        }
        if self.state.read().await.closed {
            return Err(SessionError::Closed);
        }
        self.api.close_room(&self.config.room_code).await?;
        Ok(())
    }

    /// Tear the session down: close the transport and stop the background
    /// tasks. Safe to call more than once.
    pub async fn shutdown(&mut self) {
        self.connection.disconnect().await;
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }

    // -----------------------------------------------------------------------
    // Snapshots
    // -----------------------------------------------------------------------

    pub async fn room_session(&self) -> RoomSession {
        self.state.read().await.room.clone()
    }

    pub async fn connection_state(&self) -> ConnectionState {
        self.state.read().await.room.connection
    }

    pub async fn is_connected(&self) -> bool {
        self.connection.is_connected().await
    }

    pub async fn remote_cursors(&self) -> HashMap<String, RemoteCursor> {
        self.state.read().await.cursors.snapshot()
    }

    /// Rolling candidate-integrity alerts, oldest first. Empty on the
    /// candidate side.
    pub async fn alerts(&self) -> Vec<MonitoringAlert> {
        self.state.read().await.alerts.all()
    }

    pub fn identity(&self) -> &Identity {
        &self.config.identity
    }

    pub fn role(&self) -> ParticipantRole {
        self.config.role
    }

    pub fn api(&self) -> &RoomApiClient {
        &self.api
    }
}

/// Forwards debounced keystroke reports to the relay.
async fn report_forwarder(
    mut reports_rx: mpsc::Receiver<KeystrokeReport>,
    connection: ConnectionHandle,
    identity: Identity,
) {
    while let Some(report) = reports_rx.recv().await {
        connection
            .send(WireMessage::KeystrokeMonitoring {
                user_id: identity.user_id.clone(),
                user_name: identity.display_name.clone(),
                key: report.key,
                key_combination: report.key_combination,
                is_suspicious: report.is_suspicious,
            })
            .await;
    }
}
