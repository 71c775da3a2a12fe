//! Real-time collaboration core for two-party interview rooms.
//!
//! One shared text buffer, one relay WebSocket per room, cursor presence,
//! and a candidate-integrity monitoring pipeline. Convergence is
//! whole-buffer last-writer-wins by design; see `sync` for the rationale.

pub mod connection;
pub mod error;
pub mod identity;
pub mod monitoring;
pub mod presence;
pub mod protocol;
pub mod session;
pub mod sync;

pub use connection::{ConnectionConfig, ConnectionEvent, ConnectionHandle, ConnectionState};
pub use error::SessionError;
pub use identity::Identity;
pub use monitoring::{
    AlertLog, FocusTracker, KeyModifiers, KeystrokeDebouncer, KeystrokeReport, MonitoringAlert,
};
pub use presence::{CursorRegistry, RemoteCursor};
pub use protocol::WireMessage;
pub use session::{RoomSession, RoomSessionController, SessionConfig, SessionEvent};
pub use sync::{EditorSync, LocalOutcome, RemoteOutcome};
