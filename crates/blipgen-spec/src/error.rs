//! Error types for the parameter model and preset records.

use thiserror::Error;

/// Result type for spec-level operations.
pub type SpecResult<T> = Result<T, SpecError>;

/// Errors raised while converting or (de)serialising preset data.
#[derive(Debug, Error)]
pub enum SpecError {
    /// The integer wave shape does not name a known [`crate::WaveShape`].
    #[error("unsupported wave shape: {code}")]
    UnsupportedWaveShape {
        /// The raw wave-shape value found in the record.
        code: u8,
    },

    /// The record's format tag is not one this crate understands.
    #[error("unsupported preset format: expected {expected}, found {found}")]
    UnsupportedFormat {
        /// The format tag this crate writes.
        expected: &'static str,
        /// The tag found in the record.
        found: String,
    },

    /// JSON (de)serialisation failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BackendError for SpecError {
    fn code(&self) -> &'static str {
        match self {
            SpecError::UnsupportedWaveShape { .. } => "SPEC_001",
            SpecError::UnsupportedFormat { .. } => "SPEC_002",
            SpecError::Json(_) => "SPEC_003",
        }
    }

    fn category(&self) -> &'static str {
        "spec"
    }
}

/// Common trait for reportable errors.
///
/// Each crate's error enum implements this trait so callers (the CLI in
/// particular) can print a stable code next to the message.
///
/// # Example
///
/// ```ignore
/// use blipgen_spec::error::BackendError;
///
/// fn handle_error<E: BackendError>(err: E) {
///     eprintln!("[{}] {}", err.code(), err.message());
/// }
/// ```
pub trait BackendError: std::error::Error {
    /// Get the error code for reporting.
    ///
    /// Returns a static string like "AUDIO_001" or "SPEC_002". Codes are
    /// stable and can be matched programmatically.
    fn code(&self) -> &'static str;

    /// Get a human-readable message describing the error.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Get the error category for grouping related errors.
    fn category(&self) -> &'static str;
}
