//! Flat, serialisable mirror of [`ParameterSet`].
//!
//! Field names and order are part of the on-disk contract; external
//! tooling reads and writes these records as JSON.

use serde::{Deserialize, Serialize};

use crate::error::{SpecError, SpecResult};
use crate::params::{ParameterSet, WaveShape};

/// Format tag written into every record.
pub const PRESET_FORMAT: &str = "blipgen/preset@1";

/// Category used for records that did not come from a preset constructor.
pub const CUSTOM_CATEGORY: &str = "custom";

/// A persisted preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PresetRecord {
    pub format: String,
    pub category: String,
    pub name: String,
    pub base_frequency: f64,
    pub frequency_limit: f64,
    pub frequency_ramp: f64,
    pub frequency_delta_ramp: f64,
    pub vibrato_strength: f64,
    pub vibrato_speed: f64,
    pub vibrato_delay: f64,
    pub arpeggio_mod: f64,
    pub arpeggio_speed: f64,
    pub duty_cycle: f64,
    pub duty_cycle_ramp: f64,
    pub repeat_speed: f64,
    pub flanger_phase_offset: f64,
    pub flanger_phase_ramp: f64,
    pub low_pass_filter_frequency: f64,
    pub low_pass_filter_frequency_ramp: f64,
    pub low_pass_filter_frequency_resonance: f64,
    pub high_pass_filter_frequency: f64,
    pub high_pass_filter_frequency_ramp: f64,
    pub sound_volume: f64,
    /// Integer code of a [`WaveShape`].
    pub wave_shape: u8,
    pub envelope_attack: f64,
    pub envelope_sustain: f64,
    pub envelope_punch: f64,
    pub envelope_decay: f64,
    pub sample_rate: u32,
    pub sample_size: u16,
    /// Carried noise buffer; `null` or absent when the parameter set has none.
    #[serde(default)]
    pub noise: Option<Vec<f64>>,
}

impl PresetRecord {
    /// Flattens a parameter set into a record.
    pub fn from_params(
        params: &ParameterSet,
        category: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            format: PRESET_FORMAT.to_string(),
            category: category.into(),
            name: name.into(),
            base_frequency: params.base_freq,
            frequency_limit: params.freq_limit,
            frequency_ramp: params.freq_ramp,
            frequency_delta_ramp: params.freq_dramp,
            vibrato_strength: params.vibrato_strength,
            vibrato_speed: params.vibrato_speed,
            vibrato_delay: params.vibrato_delay,
            arpeggio_mod: params.arp_mod,
            arpeggio_speed: params.arp_speed,
            duty_cycle: params.duty,
            duty_cycle_ramp: params.duty_ramp,
            repeat_speed: params.repeat_speed,
            flanger_phase_offset: params.flanger_offset,
            flanger_phase_ramp: params.flanger_ramp,
            low_pass_filter_frequency: params.lpf_freq,
            low_pass_filter_frequency_ramp: params.lpf_ramp,
            low_pass_filter_frequency_resonance: params.lpf_resonance,
            high_pass_filter_frequency: params.hpf_freq,
            high_pass_filter_frequency_ramp: params.hpf_ramp,
            sound_volume: params.sound_volume,
            wave_shape: params.wave_shape.code(),
            envelope_attack: params.attack,
            envelope_sustain: params.sustain,
            envelope_punch: params.punch,
            envelope_decay: params.decay,
            sample_rate: params.sample_rate,
            sample_size: params.sample_size,
            noise: params.noise.clone(),
        }
    }

    /// Rebuilds the parameter set.
    ///
    /// Fails with [`SpecError::UnsupportedWaveShape`] when the integer wave
    /// shape is unknown.
    pub fn to_params(&self) -> SpecResult<ParameterSet> {
        let wave_shape = WaveShape::try_from(self.wave_shape)?;
        Ok(ParameterSet {
            wave_shape,
            attack: self.envelope_attack,
            sustain: self.envelope_sustain,
            punch: self.envelope_punch,
            decay: self.envelope_decay,
            base_freq: self.base_frequency,
            freq_limit: self.frequency_limit,
            freq_ramp: self.frequency_ramp,
            freq_dramp: self.frequency_delta_ramp,
            vibrato_strength: self.vibrato_strength,
            vibrato_speed: self.vibrato_speed,
            vibrato_delay: self.vibrato_delay,
            arp_mod: self.arpeggio_mod,
            arp_speed: self.arpeggio_speed,
            duty: self.duty_cycle,
            duty_ramp: self.duty_cycle_ramp,
            repeat_speed: self.repeat_speed,
            flanger_offset: self.flanger_phase_offset,
            flanger_ramp: self.flanger_phase_ramp,
            lpf_freq: self.low_pass_filter_frequency,
            lpf_ramp: self.low_pass_filter_frequency_ramp,
            lpf_resonance: self.low_pass_filter_frequency_resonance,
            hpf_freq: self.high_pass_filter_frequency,
            hpf_ramp: self.high_pass_filter_frequency_ramp,
            sound_volume: self.sound_volume,
            sample_rate: self.sample_rate,
            sample_size: self.sample_size,
            noise: self.noise.clone(),
        })
    }

    /// Serialises the record as pretty-printed JSON.
    pub fn to_json_string(&self) -> SpecResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a record from JSON and checks its format tag.
    pub fn from_json_str(json: &str) -> SpecResult<Self> {
        let record: PresetRecord = serde_json::from_str(json)?;
        if record.format != PRESET_FORMAT {
            return Err(SpecError::UnsupportedFormat {
                expected: PRESET_FORMAT,
                found: record.format,
            });
        }
        Ok(record)
    }
}

impl TryFrom<&PresetRecord> for ParameterSet {
    type Error = SpecError;

    fn try_from(record: &PresetRecord) -> Result<Self, Self::Error> {
        record.to_params()
    }
}
