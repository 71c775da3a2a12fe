//! Domain types shared between the REST client and the realtime session.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

// ---------------------------------------------------------------------------
// Room code
// ---------------------------------------------------------------------------

/// A 6-character uppercase alphanumeric session identifier.
///
/// Codes entered by a user are normalized (trimmed, uppercased) before
/// validation, so `" ab12cd "` parses to `AB12CD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCode(String);

impl RoomCode {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let normalized = raw.trim().to_ascii_uppercase();
        let valid = normalized.len() == 6
            && normalized
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());
        if valid {
            Ok(Self(normalized))
        } else {
            Err(ValidationError::InvalidRoomCode(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Participants and room state
// ---------------------------------------------------------------------------

/// Which side of the interview this client is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantRole {
    Interviewer,
    Candidate,
}

impl fmt::Display for ParticipantRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParticipantRole::Interviewer => write!(f, "interviewer"),
            ParticipantRole::Candidate => write!(f, "candidate"),
        }
    }
}

/// A participant as reported by the room backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantInfo {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Lifecycle status of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    WaitingForCandidate,
    InProgress,
    Closed,
}

/// Authoritative room snapshot, as served by `GET /api/room/{code}` and the
/// `room_state` message sent once per new relay connection.
///
/// `room_code` stays a plain string here: it is server-provided data, not
/// user input, so it is not re-validated on deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomInfo {
    pub room_code: String,
    pub interviewer: ParticipantInfo,
    pub candidate: Option<ParticipantInfo>,
    pub status: RoomStatus,
    pub editor_content: String,
}
