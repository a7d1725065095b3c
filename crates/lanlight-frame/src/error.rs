/// Errors that can occur while building or encoding frames.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The payload does not fit in the 16-bit size field.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// A scalar value is outside its permitted range.
    #[error("{field} out of range ({value}, expected {min} to {max})")]
    OutOfRange {
        field: &'static str,
        value: String,
        min: String,
        max: String,
    },

    /// A label exceeds the fixed on-device label field.
    #[error("label too long ({len} bytes, max {max})")]
    LabelTooLong { len: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, FrameError>;
