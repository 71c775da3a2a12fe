//! Configuration, state, and event types for the relay connection.

use pairboard_common::RoomCode;

use crate::protocol::WireMessage;

/// Configuration for one relay connection.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Base URL of the relay host. `http(s)` schemes are rewritten to
    /// `ws(s)`, matching how the backend shares one host for REST and
    /// WebSocket traffic.
    pub base_url: String,
    pub room_code: RoomCode,
    /// Give up on the initial connect after this many seconds.
    pub connect_timeout_secs: u64,
}

impl ConnectionConfig {
    pub fn new(base_url: &str, room_code: RoomCode) -> Self {
        Self {
            base_url: base_url.to_string(),
            room_code,
            connect_timeout_secs: 15,
        }
    }

    /// Build the WebSocket URL for the room channel.
    pub(crate) fn ws_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let base = if let Some(rest) = base.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = base.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            base.to_string()
        };
        format!("{base}/ws/{}", self.room_code)
    }
}

/// Transport lifecycle state, driving UI connectivity indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Errored,
}

/// Events raised by the connection task.
#[derive(Debug, Clone)]
pub enum ConnectionEvent {
    /// Transport established. Raised exactly once per successful connect.
    Open,
    /// A decoded inbound frame.
    Message(WireMessage),
    /// Connect or transport failure. Non-fatal to the process; the
    /// connection ends and `Closed` follows.
    Error(String),
    /// Transport gone. Raised exactly once per completed or aborted
    /// connection.
    Closed,
}

/// Commands from the handle to the connection task.
#[derive(Debug)]
pub(crate) enum ConnectionCommand {
    Send(WireMessage),
    Disconnect,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base: &str) -> ConnectionConfig {
        ConnectionConfig::new(base, RoomCode::parse("AB12CD").unwrap())
    }

    #[test]
    fn ws_url_rewrites_http_scheme() {
        assert_eq!(
            config("http://localhost:8000").ws_url(),
            "ws://localhost:8000/ws/AB12CD"
        );
        assert_eq!(
            config("https://rooms.example.com").ws_url(),
            "wss://rooms.example.com/ws/AB12CD"
        );
    }

    #[test]
    fn ws_url_trims_trailing_slash_and_keeps_ws_scheme() {
        assert_eq!(
            config("http://localhost:8000/").ws_url(),
            "ws://localhost:8000/ws/AB12CD"
        );
        assert_eq!(
            config("ws://localhost:8000").ws_url(),
            "ws://localhost:8000/ws/AB12CD"
        );
    }
}
