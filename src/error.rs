use std::fmt;

/// Top-level error type for the audio core. Every failure is
/// deterministic for a given input, so nothing here is retryable.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioError {
    /// A numeric parameter was non-positive, non-finite, or out of range.
    InvalidParameter { name: &'static str, value: f64 },
    /// The PCM container uses a bit depth or channel layout we don't handle.
    Unsupported(FormatError),
    /// The external decoder failed or produced an unreadable stream.
    ExternalDecode { detail: String },
    /// The requested buffer exceeds the sample-count cap.
    ResourceExhausted { requested_samples: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    BitDepth { bits: u16 },
    ChannelCount { channels: u16 },
    Malformed { detail: String },
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::InvalidParameter { name, value } => {
                write!(f, "Invalid parameter: {name} = {value}")
            }
            AudioError::Unsupported(e) => write!(f, "Unsupported format: {e}"),
            AudioError::ExternalDecode { detail } => write!(f, "External decode failed: {detail}"),
            AudioError::ResourceExhausted { requested_samples } => {
                write!(f, "Render too large: {requested_samples} samples requested")
            }
        }
    }
}

impl std::error::Error for AudioError {}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::BitDepth { bits } => write!(f, "{bits}-bit samples"),
            FormatError::ChannelCount { channels } => write!(f, "{channels} channels"),
            FormatError::Malformed { detail } => write!(f, "malformed container ({detail})"),
        }
    }
}

impl std::error::Error for FormatError {}

impl From<FormatError> for AudioError {
    fn from(e: FormatError) -> Self {
        AudioError::Unsupported(e)
    }
}

/// Reject a value that must be strictly positive and finite.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<(), AudioError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(AudioError::InvalidParameter { name, value });
    }
    Ok(())
}

/// Reject a non-finite value (gains may legitimately be zero or negative).
pub(crate) fn require_finite(name: &'static str, value: f64) -> Result<(), AudioError> {
    if !value.is_finite() {
        return Err(AudioError::InvalidParameter { name, value });
    }
    Ok(())
}
