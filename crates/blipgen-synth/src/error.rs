//! Error types for the synthesis engine.

use blipgen_spec::{BackendError, SpecError};
use thiserror::Error;

/// Result type for synthesis operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Errors that can occur during synthesis.
#[derive(Debug, Error)]
pub enum AudioError {
    /// A wave-shape value outside the known set reached the synthesiser.
    #[error("unsupported wave shape: {code}")]
    UnsupportedWaveShape {
        /// The raw wave-shape value.
        code: u8,
    },

    /// Generation ran past the configured iteration budget without the
    /// envelope or the frequency cutoff ending it.
    #[error("generation exceeded the limit of {limit} iterations")]
    GenerationExceededLimit {
        /// The budget that was exhausted.
        limit: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// Preset record error other than an unknown wave shape.
    #[error(transparent)]
    Spec(SpecError),
}

impl AudioError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl From<SpecError> for AudioError {
    fn from(err: SpecError) -> Self {
        match err {
            SpecError::UnsupportedWaveShape { code } => AudioError::UnsupportedWaveShape { code },
            other => AudioError::Spec(other),
        }
    }
}

impl BackendError for AudioError {
    fn code(&self) -> &'static str {
        match self {
            AudioError::UnsupportedWaveShape { .. } => "AUDIO_001",
            AudioError::GenerationExceededLimit { .. } => "AUDIO_002",
            AudioError::InvalidParameter { .. } => "AUDIO_003",
            AudioError::Spec(err) => err.code(),
        }
    }

    fn category(&self) -> &'static str {
        match self {
            AudioError::Spec(_) => "spec",
            _ => "audio",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_param_helper() {
        let err = AudioError::invalid_param("max_iterations", "must be at least 1");
        assert!(err.to_string().contains("max_iterations"));
        assert!(err.to_string().contains("at least 1"));
        assert_eq!(err.code(), "AUDIO_003");
    }

    #[test]
    fn test_wave_shape_error_converts_to_typed_variant() {
        let err: AudioError = SpecError::UnsupportedWaveShape { code: 12 }.into();
        assert!(matches!(err, AudioError::UnsupportedWaveShape { code: 12 }));
        assert_eq!(err.category(), "audio");
    }

    #[test]
    fn test_other_spec_errors_keep_their_code() {
        let err: AudioError = SpecError::UnsupportedFormat {
            expected: "blipgen/preset@1",
            found: "x".to_string(),
        }
        .into();
        assert_eq!(err.code(), "SPEC_002");
        assert_eq!(err.category(), "spec");
    }

    #[test]
    fn test_limit_message() {
        let err = AudioError::GenerationExceededLimit { limit: 10 };
        assert_eq!(err.to_string(), "generation exceeded the limit of 10 iterations");
    }
}
