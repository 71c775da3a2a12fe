//! Inbound message handling: connection events → session state + UI events.

use std::sync::Arc;

use pairboard_common::{ParticipantRole, RoomStatus};
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, info};

use crate::connection::{ConnectionEvent, ConnectionHandle, ConnectionState};
use crate::protocol::WireMessage;
use crate::sync::RemoteOutcome;

use super::types::{SessionEvent, SessionState};

/// Background task draining connection events for the life of the session.
pub(crate) async fn event_translator(
    mut conn_rx: mpsc::Receiver<ConnectionEvent>,
    state: Arc<RwLock<SessionState>>,
    event_tx: mpsc::Sender<SessionEvent>,
    connection: ConnectionHandle,
    self_id: String,
    role: ParticipantRole,
) {
    while let Some(conn_event) = conn_rx.recv().await {
        let events = {
            let mut state = state.write().await;
            apply_connection_event(&mut state, conn_event, &self_id, role)
        };
        for event in events {
            let terminal = matches!(event, SessionEvent::SessionClosed { .. });
            let _ = event_tx.send(event).await;
            if terminal {
                connection.disconnect().await;
            }
        }
    }
}

/// Apply one connection event to the session state, returning the UI
/// events it produced. Pure apart from logging, so it is unit-testable
/// without a socket.
pub(crate) fn apply_connection_event(
    state: &mut SessionState,
    event: ConnectionEvent,
    self_id: &str,
    role: ParticipantRole,
) -> Vec<SessionEvent> {
    match event {
        ConnectionEvent::Open => {
            state.room.connection = ConnectionState::Connected;
            vec![SessionEvent::ConnectionStateChanged(ConnectionState::Connected)]
        }
        ConnectionEvent::Error(message) => {
            state.room.connection = ConnectionState::Errored;
            vec![
                SessionEvent::ConnectionStateChanged(ConnectionState::Errored),
                SessionEvent::Error(message),
            ]
        }
        ConnectionEvent::Closed => {
            state.room.connection = ConnectionState::Disconnected;
            vec![SessionEvent::ConnectionStateChanged(
                ConnectionState::Disconnected,
            )]
        }
        ConnectionEvent::Message(msg) => apply_message(state, msg, self_id, role),
    }
}

/// Apply one decoded wire message.
pub(crate) fn apply_message(
    state: &mut SessionState,
    msg: WireMessage,
    self_id: &str,
    role: ParticipantRole,
) -> Vec<SessionEvent> {
    match msg {
        WireMessage::RoomState { room_info } => {
            let mut events = Vec::new();
            // The room state always wins at session start.
            if let RemoteOutcome::Replace { content } =
                state.sync.apply_snapshot(&room_info.editor_content)
            {
                events.push(SessionEvent::EditorContentReplaced { content });
            }
            state.room.info = room_info.clone();
            events.push(SessionEvent::RoomInfoChanged(room_info));
            events
        }

        WireMessage::EditorUpdate {
            content, user_id, ..
        } => match state.sync.remote_update(&user_id, self_id, &content) {
            RemoteOutcome::Replace { content } => {
                state.room.info.editor_content = content.clone();
                vec![SessionEvent::EditorContentReplaced { content }]
            }
            RemoteOutcome::Ignored => vec![],
        },

        WireMessage::CursorUpdate {
            user_id,
            user_name,
            cursor_position,
            ..
        } => {
            if state
                .cursors
                .observe(self_id, &user_id, &user_name, cursor_position.clone())
            {
                vec![SessionEvent::RemoteCursorMoved {
                    user_id,
                    display_name: user_name,
                    position: cursor_position,
                }]
            } else {
                vec![]
            }
        }

        WireMessage::ParticipantJoined { .. } => {
            debug!("participant joined the room channel");
            vec![SessionEvent::ParticipantJoined]
        }

        // Informational only: cursor entries are not evicted on leave.
        WireMessage::ParticipantLeft { .. } => {
            debug!("participant left the room channel");
            vec![SessionEvent::ParticipantLeft]
        }

        WireMessage::RoomClosed { message, .. } => {
            info!("room closed by the backend");
            state.closed = true;
            state.room.info.status = RoomStatus::Closed;
            vec![SessionEvent::SessionClosed { reason: message }]
        }

        WireMessage::CandidateMonitoringAlert {
            alert_type,
            message,
            timestamp,
        } => {
            if role == ParticipantRole::Interviewer {
                let alert = crate::monitoring::MonitoringAlert {
                    alert_type,
                    message,
                    timestamp,
                };
                state.alerts.push(alert.clone());
                vec![SessionEvent::MonitoringAlert(alert)]
            } else {
                debug!("ignoring monitoring alert on the candidate side");
                vec![]
            }
        }

        // Raw monitoring frames are between the candidate and the backend;
        // the interviewer consumes the digested alerts instead.
        WireMessage::WindowFocusLost { user_id, duration, .. } => {
            debug!(user_id = %user_id, duration, "ignoring raw focus-loss frame");
            vec![]
        }
        WireMessage::KeystrokeMonitoring { user_id, key, .. } => {
            debug!(user_id = %user_id, key = %key, "ignoring raw keystroke frame");
            vec![]
        }
    }
}
