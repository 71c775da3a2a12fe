//! Wire envelope for the room relay channel.
//!
//! Every frame is one JSON object discriminated by a `type` field. Decode
//! failures are logged and dropped — a single corrupt frame must not end
//! the session. Absent optional fields are omitted on encode, never null.

use pairboard_common::RoomInfo;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A message exchanged over `/ws/{room_code}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WireMessage {
    /// Authoritative full-state snapshot, sent once per new connection.
    RoomState { room_info: RoomInfo },

    /// Whole-buffer content replacement from one participant.
    EditorUpdate {
        content: String,
        user_id: String,
        user_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cursor_position: Option<serde_json::Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp: Option<String>,
    },

    /// Cursor movement without a content change.
    CursorUpdate {
        user_id: String,
        user_name: String,
        cursor_position: serde_json::Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp: Option<String>,
    },

    ParticipantJoined {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp: Option<String>,
    },

    ParticipantLeft {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp: Option<String>,
    },

    /// The room was closed; terminal for the session.
    RoomClosed {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp: Option<String>,
    },

    /// Candidate lost window focus for `duration` whole seconds.
    WindowFocusLost {
        user_id: String,
        user_name: String,
        duration: u64,
    },

    /// One debounced candidate keystroke, classified against the denylist.
    KeystrokeMonitoring {
        user_id: String,
        user_name: String,
        key: String,
        key_combination: String,
        is_suspicious: bool,
    },

    /// Server-generated integrity alert, consumed by the interviewer.
    CandidateMonitoringAlert {
        alert_type: String,
        message: String,
        timestamp: String,
    },
}

impl WireMessage {
    /// Parse a frame. Malformed JSON and unknown `type` values are logged
    /// and discarded rather than treated as fatal.
    pub fn decode(raw: &str) -> Option<Self> {
        match serde_json::from_str(raw) {
            Ok(msg) => Some(msg),
            Err(e) => {
                warn!(error = %e, "discarding undecodable frame");
                None
            }
        }
    }

    /// Serialize for the wire.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairboard_common::RoomStatus;

    #[test]
    fn decodes_editor_update() {
        let raw = r#"{"type": "editor_update", "content": "def f():", "user_id": "u2",
                      "user_name": "Grace", "cursor_position": null,
                      "timestamp": "2026-08-26T10:00:00Z"}"#;
        let msg = WireMessage::decode(raw).unwrap();
        match msg {
            WireMessage::EditorUpdate {
                content, user_id, ..
            } => {
                assert_eq!(content, "def f():");
                assert_eq!(user_id, "u2");
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn decodes_room_state_snapshot() {
        let raw = r#"{"type": "room_state", "room_info": {
            "room_code": "AB12CD",
            "interviewer": {"id": "u1", "name": "Ada", "email": "ada@example.com"},
            "candidate": null,
            "status": "waiting_for_candidate",
            "editor_content": "x = 1"
        }}"#;
        match WireMessage::decode(raw).unwrap() {
            WireMessage::RoomState { room_info } => {
                assert_eq!(room_info.status, RoomStatus::WaitingForCandidate);
                assert_eq!(room_info.editor_content, "x = 1");
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn decodes_notifications_without_payload() {
        assert_eq!(
            WireMessage::decode(r#"{"type": "participant_joined"}"#),
            Some(WireMessage::ParticipantJoined { timestamp: None })
        );
        assert_eq!(
            WireMessage::decode(r#"{"type": "room_closed"}"#),
            Some(WireMessage::RoomClosed {
                message: None,
                timestamp: None
            })
        );
    }

    #[test]
    fn unknown_type_is_dropped() {
        assert!(WireMessage::decode(r#"{"type": "time_travel", "to": "yesterday"}"#).is_none());
    }

    #[test]
    fn malformed_json_is_dropped() {
        assert!(WireMessage::decode("{not json").is_none());
        assert!(WireMessage::decode("").is_none());
    }

    #[test]
    fn encode_omits_absent_optionals() {
        let msg = WireMessage::EditorUpdate {
            content: "x".into(),
            user_id: "u1".into(),
            user_name: "Ada".into(),
            cursor_position: None,
            timestamp: None,
        };
        let json = msg.encode().unwrap();
        assert!(json.contains(r#""type":"editor_update""#));
        assert!(!json.contains("cursor_position"));
        assert!(!json.contains("null"));
    }

    #[test]
    fn encode_round_trips_monitoring_messages() {
        let msg = WireMessage::KeystrokeMonitoring {
            user_id: "u2".into(),
            user_name: "Grace".into(),
            key: "c".into(),
            key_combination: "Ctrl+c".into(),
            is_suspicious: true,
        };
        let json = msg.encode().unwrap();
        assert!(json.contains(r#""type":"keystroke_monitoring""#));
        assert_eq!(WireMessage::decode(&json), Some(msg));

        let msg = WireMessage::WindowFocusLost {
            user_id: "u2".into(),
            user_name: "Grace".into(),
            duration: 2,
        };
        assert_eq!(WireMessage::decode(&msg.encode().unwrap()), Some(msg));
    }

    #[test]
    fn decodes_candidate_monitoring_alert() {
        let raw = r#"{"type": "candidate_monitoring_alert", "alert_type": "window_focus_lost",
                      "message": "Grace left the interview window for 3s",
                      "timestamp": "2026-08-26T10:00:00Z"}"#;
        match WireMessage::decode(raw).unwrap() {
            WireMessage::CandidateMonitoringAlert { alert_type, .. } => {
                assert_eq!(alert_type, "window_focus_lost");
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }
}
