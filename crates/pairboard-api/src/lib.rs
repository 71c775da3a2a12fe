//! Typed client for the interview-room REST backend.
//!
//! The backend owns room persistence, monitoring history, and authorization;
//! this crate only consumes it. Authenticated requests carry a bearer token
//! sourced from the external identity provider.

pub mod client;
pub mod error;
pub mod types;

pub use client::{ApiConfig, RoomApiClient};
pub use error::ApiError;
pub use types::{
    CloseRoomResponse, CreateRoomResponse, HealthResponse, JoinRoomResponse, KeystrokeLogEntry,
    MonitoringIncident, MonitoringReport,
};
