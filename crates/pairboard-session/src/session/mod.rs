//! Room session orchestration.
//!
//! The controller composes the REST client, the relay connection, the sync
//! engine, presence, and monitoring, and fans typed events out to the UI.
//! It is the single owner of the room snapshot; all inbound mutation goes
//! through the translator.

mod controller;
mod translator;
mod types;

pub use controller::RoomSessionController;
pub use types::{RoomSession, SessionConfig, SessionEvent};
