use pairboard_api::ApiError;
use pairboard_common::ValidationError;

/// Errors surfaced to the caller by the session layer.
///
/// Transport and protocol problems inside a running session are reported as
/// events, not errors; this type covers operations with a synchronous
/// failure mode (initialization, validated actions).
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("session already closed")]
    Closed,
}
