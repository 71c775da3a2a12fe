pub mod errors;
pub mod types;

pub use errors::ValidationError;
pub use types::{ParticipantInfo, ParticipantRole, RoomCode, RoomInfo, RoomStatus};
