//! Response shapes for the room REST backend.

use pairboard_common::RoomInfo;
use serde::{Deserialize, Serialize};

/// Response to `POST /api/create-room`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRoomResponse {
    pub room_code: String,
    pub status: String,
    pub message: String,
}

/// Response to `POST /api/join-room`.
#[derive(Debug, Clone, Deserialize)]
pub struct JoinRoomResponse {
    pub room_code: String,
    pub status: String,
    pub message: String,
    pub room_info: RoomInfo,
}

/// Response to `DELETE /api/room/{code}`.
#[derive(Debug, Clone, Deserialize)]
pub struct CloseRoomResponse {
    pub status: String,
    pub message: String,
}

/// One focus-loss (or similar) incident from the server-side monitoring log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringIncident {
    #[serde(rename = "type")]
    pub kind: String,
    pub user_id: String,
    pub user_name: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
}

/// One keystroke entry from the server-side monitoring log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeystrokeLogEntry {
    pub user_id: String,
    pub user_name: String,
    pub timestamp: String,
    pub key: String,
    pub key_combination: String,
    pub is_suspicious: bool,
}

/// Response to `GET /api/room/{code}/monitoring` (interviewer only).
#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringReport {
    pub room_code: String,
    pub monitoring_incidents: Vec<MonitoringIncident>,
    pub keystroke_logs: Vec<KeystrokeLogEntry>,
    pub total_incidents: usize,
    pub total_keystrokes: usize,
}

/// Response to `GET /api/health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub active_rooms: usize,
    pub active_connections: usize,
}
