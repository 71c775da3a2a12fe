//! Relay WebSocket connection over `tokio-tungstenite`.
//!
//! One transport per [`ConnectionHandle::open`] call, no automatic
//! reconnection: a dropped connection surfaces as `Closed` and stays down
//! until the owning session is re-initialized. Sends while not connected
//! are silent no-ops.

mod client;
mod task;
mod types;

pub use client::ConnectionHandle;
pub use types::{ConnectionConfig, ConnectionEvent, ConnectionState};
