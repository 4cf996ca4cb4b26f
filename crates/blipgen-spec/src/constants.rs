//! Environment-level constants shared by the synthesizer and its callers.

/// Number of sub-samples synthesised per 44.1 kHz step.
pub const OVERSAMPLING: usize = 8;

/// The rate at which the envelope and pitch run-state advance, in Hz.
///
/// Lower output rates are produced by averaging groups of these steps.
pub const BASE_SAMPLE_RATE: u32 = 44_100;

/// Default output sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Default output sample size in bits.
pub const DEFAULT_SAMPLE_SIZE: u16 = 16;

/// Default gain applied to every output sample.
pub const DEFAULT_SOUND_VOLUME: f64 = 0.5;

/// Length of a noise buffer, in samples.
pub const NOISE_BUFFER_LEN: usize = 32;

/// Length of the flanger's circular delay buffer, in samples.
pub const FLANGER_BUFFER_LEN: usize = 1024;

/// Envelope stage lengths are `floor(x² · ENVELOPE_SCALE)` steps.
pub const ENVELOPE_SCALE: f64 = 100_000.0;
