//! Configuration, state, and event types for the room session.

use pairboard_common::{ParticipantRole, RoomCode, RoomInfo};

use crate::connection::ConnectionState;
use crate::identity::Identity;
use crate::monitoring::{AlertLog, FocusTracker, MonitoringAlert};
use crate::presence::CursorRegistry;
use crate::sync::EditorSync;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for one room session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub room_code: RoomCode,
    pub identity: Identity,
    pub role: ParticipantRole,
    /// Relay host override. Defaults to the REST base URL with the scheme
    /// rewritten to ws(s).
    pub relay_url: Option<String>,
    /// Keystroke debounce quiet window in milliseconds.
    pub keystroke_quiet_ms: u64,
    /// Minimum focus-loss duration worth reporting, in milliseconds.
    pub focus_threshold_ms: u64,
    /// Display capacity of the rolling monitoring-alert log.
    pub alert_log_capacity: usize,
}

impl SessionConfig {
    pub fn new(room_code: RoomCode, identity: Identity, role: ParticipantRole) -> Self {
        Self {
            room_code,
            identity,
            role,
            relay_url: None,
            keystroke_quiet_ms: 100,
            focus_threshold_ms: 1000,
            alert_log_capacity: 50,
        }
    }
}

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Snapshot of the live session for the UI.
#[derive(Debug, Clone)]
pub struct RoomSession {
    pub info: RoomInfo,
    /// Display hint for the editor; local-only, not synchronized.
    pub language: String,
    pub connection: ConnectionState,
}

/// All mutable session state under one lock, so the translator and the
/// controller's operations never see the maps out of sync.
pub(crate) struct SessionState {
    pub room: RoomSession,
    pub sync: EditorSync,
    pub cursors: CursorRegistry,
    pub alerts: AlertLog,
    pub focus: FocusTracker,
    /// Set once a `room_closed` arrives; terminal for this controller.
    pub closed: bool,
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Events fanned out to the UI layer.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The authoritative room snapshot changed.
    RoomInfoChanged(RoomInfo),
    ConnectionStateChanged(ConnectionState),
    /// Write `content` into the editor buffer as a programmatic update.
    /// Must not be fed back through `local_edit`.
    EditorContentReplaced { content: String },
    RemoteCursorMoved {
        user_id: String,
        display_name: String,
        position: serde_json::Value,
    },
    ParticipantJoined,
    ParticipantLeft,
    /// Candidate-integrity alert for the interviewer's rolling log.
    MonitoringAlert(MonitoringAlert),
    /// Candidate lost window focus (UI banner).
    FocusWarning,
    FocusRegained,
    /// The room was closed. Terminal; the session cannot be rejoined from
    /// this controller.
    SessionClosed { reason: Option<String> },
    /// Transport-level failure; the session stays down until reopened.
    Error(String),
}
