use crate::types::ParticipantRole;

/// Errors raised by input validation, before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("room code must be exactly 6 uppercase alphanumeric characters, got {0:?}")]
    InvalidRoomCode(String),

    #[error("only the {0} may perform this action")]
    RoleRequired(ParticipantRole),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_room_code_display() {
        let err = ValidationError::InvalidRoomCode("ab1".into());
        assert_eq!(
            err.to_string(),
            "room code must be exactly 6 uppercase alphanumeric characters, got \"ab1\""
        );
    }

    #[test]
    fn role_required_display() {
        let err = ValidationError::RoleRequired(ParticipantRole::Interviewer);
        assert_eq!(err.to_string(), "only the interviewer may perform this action");
    }
}
