/// Errors that can occur during a request/response exchange.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Socket-level error.
    #[error("socket error: {0}")]
    Io(#[from] std::io::Error),

    /// Frame-level error.
    #[error("frame error: {0}")]
    Frame(#[from] lanlight_frame::FrameError),

    /// No matching response arrived within the response expiry window.
    #[error("response timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// The caller cancelled the wait.
    #[error("request cancelled")]
    Cancelled,

    /// The device answered with a different payload than the request expects.
    #[error("unexpected response payload: expected {expected}, got {actual}")]
    UnexpectedPayload {
        expected: &'static str,
        actual: &'static str,
    },

    /// The background receiver stopped; no further responses can arrive.
    #[error("response reader stopped")]
    ReaderStopped,
}

impl SessionError {
    /// True for outcomes where the wait ended before a response matched.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, SessionError::Timeout(_) | SessionError::Cancelled)
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
