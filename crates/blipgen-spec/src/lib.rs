//! blipgen parameter model
//!
//! This crate holds the data every other blipgen crate agrees on:
//!
//! - [`ParameterSet`]: the ~30 normalised parameters that fully describe one
//!   procedural sound effect (tone, envelope, vibrato, arpeggio, duty,
//!   repeat, flanger, filters, volume, output format)
//! - [`PresetRecord`]: a flat, serialisable mirror of `ParameterSet` with
//!   stable field names, used for persistence round-tripping
//! - [`constants`]: environment-level constants such as the oversampling
//!   factor and default output format
//!
//! # Example
//!
//! ```
//! use blipgen_spec::{ParameterSet, PresetRecord, WaveShape};
//!
//! let params = ParameterSet::default()
//!     .with_wave_shape(WaveShape::Sine)
//!     .with_base_freq(0.45);
//!
//! let record = PresetRecord::from_params(&params, "custom", "my blip");
//! let json = record.to_json_string().unwrap();
//! let back = PresetRecord::from_json_str(&json).unwrap().to_params().unwrap();
//! assert_eq!(back, params);
//! ```

pub mod constants;
pub mod error;
pub mod params;
pub mod record;

pub use error::{BackendError, SpecError, SpecResult};
pub use params::{
    to_external_base_freq, to_internal_base_freq, EnvelopeStage, NoiseColor, ParameterSet,
    WaveShape, TUNABLE_FIELD_NAMES,
};
pub use record::{PresetRecord, CUSTOM_CATEGORY, PRESET_FORMAT};
