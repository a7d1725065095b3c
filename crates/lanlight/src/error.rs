use lanlight_frame::{FrameError, Product};
use lanlight_session::SessionError;

/// Errors surfaced by the device facade.
#[derive(Debug, thiserror::Error)]
pub enum LightError {
    /// Request/response exchange failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A value could not be encoded.
    #[error(transparent)]
    Frame(#[from] FrameError),

    /// Hue and saturation were sent to a white-only model.
    #[error("{0:?} does not support color")]
    ColorUnsupported(Product),
}

impl LightError {
    /// True when the wait ended by timeout or caller cancellation.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, LightError::Session(err) if err.is_cancellation())
    }
}

pub type Result<T> = std::result::Result<T, LightError>;
