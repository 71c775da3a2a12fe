/// Errors from the room REST backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never completed (DNS, refused connection, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status. `detail` carries the
    /// server-provided message when one was parseable.
    #[error("server rejected request: {detail} (HTTP {status})")]
    Rejected { status: u16, detail: String },

    /// The response body did not match the expected shape.
    #[error("response parse error: {0}")]
    Parse(String),
}
