//! The synthesis parameter set and its enums.
//!
//! A [`ParameterSet`] is the complete "genome" of one sound effect. It is a
//! plain value: the generator only ever reads it, and every edit goes
//! through a `with_*` transformer or an explicit copy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    BASE_SAMPLE_RATE, DEFAULT_SAMPLE_RATE, DEFAULT_SAMPLE_SIZE, DEFAULT_SOUND_VOLUME,
    NOISE_BUFFER_LEN, OVERSAMPLING,
};
use crate::error::SpecError;

/// Oscillator wave shape.
///
/// The discriminants are the stable integer codes used by
/// [`crate::PresetRecord::wave_shape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum WaveShape {
    /// Pulse wave whose high fraction follows the duty cycle.
    #[default]
    Square = 0,
    /// Triangle wave, peaking at the duty point.
    Triangle = 1,
    /// Sawtooth ramp.
    Sawtooth = 2,
    /// Pure sine.
    Sine = 3,
    /// White noise, refreshed every period.
    WhiteNoise = 4,
    /// Pink (1/f) noise.
    PinkNoise = 5,
    /// Brownian (1/f²) noise.
    BrownianNoise = 6,
}

impl WaveShape {
    /// All wave shapes in code order.
    pub const ALL: [WaveShape; 7] = [
        WaveShape::Square,
        WaveShape::Triangle,
        WaveShape::Sawtooth,
        WaveShape::Sine,
        WaveShape::WhiteNoise,
        WaveShape::PinkNoise,
        WaveShape::BrownianNoise,
    ];

    /// Returns the stable integer code.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Returns the noise color for noise shapes.
    pub fn noise_color(self) -> Option<NoiseColor> {
        match self {
            WaveShape::WhiteNoise => Some(NoiseColor::White),
            WaveShape::PinkNoise => Some(NoiseColor::Pink),
            WaveShape::BrownianNoise => Some(NoiseColor::Brownian),
            _ => None,
        }
    }

    /// Returns the kebab-case name used on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            WaveShape::Square => "square",
            WaveShape::Triangle => "triangle",
            WaveShape::Sawtooth => "sawtooth",
            WaveShape::Sine => "sine",
            WaveShape::WhiteNoise => "white-noise",
            WaveShape::PinkNoise => "pink-noise",
            WaveShape::BrownianNoise => "brownian-noise",
        }
    }
}

impl TryFrom<u8> for WaveShape {
    type Error = SpecError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        WaveShape::ALL
            .get(code as usize)
            .copied()
            .ok_or(SpecError::UnsupportedWaveShape { code })
    }
}

impl fmt::Display for WaveShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WaveShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WaveShape::ALL
            .iter()
            .copied()
            .find(|shape| shape.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = WaveShape::ALL.iter().map(|w| w.as_str()).collect();
                format!("unknown wave shape '{}' (expected one of: {})", s, names.join(", "))
            })
    }
}

/// Color of a noise wave shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoiseColor {
    /// Independent uniform samples.
    White,
    /// Kellet-filtered white noise.
    Pink,
    /// Leaky-integrated white noise.
    Brownian,
}

/// Amplitude envelope stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EnvelopeStage {
    /// Linear ramp from silence to full volume.
    #[default]
    Attack,
    /// Held at full volume, optionally punched louder at the start.
    Sustain,
    /// Linear ramp down to silence. Running past it ends the sound.
    Decay,
}

impl EnvelopeStage {
    /// Returns the following stage, or `None` once decay has finished.
    pub fn next(self) -> Option<EnvelopeStage> {
        match self {
            EnvelopeStage::Attack => Some(EnvelopeStage::Sustain),
            EnvelopeStage::Sustain => Some(EnvelopeStage::Decay),
            EnvelopeStage::Decay => None,
        }
    }

    /// Index into per-stage tables.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Names of the fields touched by mutation, in [`ParameterSet::tunable_mut`] order.
pub const TUNABLE_FIELD_NAMES: [&str; 22] = [
    "base_freq",
    "freq_ramp",
    "freq_dramp",
    "duty",
    "duty_ramp",
    "vibrato_strength",
    "vibrato_speed",
    "vibrato_delay",
    "attack",
    "sustain",
    "decay",
    "punch",
    "lpf_resonance",
    "lpf_freq",
    "lpf_ramp",
    "hpf_freq",
    "hpf_ramp",
    "flanger_offset",
    "flanger_ramp",
    "repeat_speed",
    "arp_speed",
    "arp_mod",
];

/// Normalised synthesis parameters for one sound effect.
///
/// Signed fields (`*_ramp`, `arp_mod`, `flanger_offset`) live in `[-1, 1]`;
/// the rest are conventionally in `[0, 1]`. Nothing is clamped here:
/// out-of-range values only change the generator's derived run-state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    /// Oscillator wave shape.
    pub wave_shape: WaveShape,

    /// Attack length (stage length is `attack² · 100000` steps).
    pub attack: f64,
    /// Sustain length.
    pub sustain: f64,
    /// Extra volume at the start of sustain.
    pub punch: f64,
    /// Decay length.
    pub decay: f64,

    /// Start frequency (see [`to_external_base_freq`]).
    pub base_freq: f64,
    /// Frequency floor; when non-zero, sliding below it ends the sound.
    pub freq_limit: f64,
    /// Frequency slide (signed).
    pub freq_ramp: f64,
    /// Acceleration of the frequency slide (signed).
    pub freq_dramp: f64,

    /// Vibrato depth.
    pub vibrato_strength: f64,
    /// Vibrato rate.
    pub vibrato_speed: f64,
    /// Vibrato onset delay. Carried for record compatibility.
    pub vibrato_delay: f64,

    /// Arpeggio pitch jump (signed; positive jumps up).
    pub arp_mod: f64,
    /// How soon the arpeggio jump happens; 1.0 disables it.
    pub arp_speed: f64,

    /// Square duty cycle.
    pub duty: f64,
    /// Duty cycle sweep (signed).
    pub duty_ramp: f64,

    /// Retrigger rate; 0.0 disables repeats.
    pub repeat_speed: f64,

    /// Flanger delay offset (signed).
    pub flanger_offset: f64,
    /// Flanger delay sweep (signed).
    pub flanger_ramp: f64,

    /// Low-pass cutoff; exactly 1.0 bypasses the filter.
    pub lpf_freq: f64,
    /// Low-pass cutoff sweep (signed).
    pub lpf_ramp: f64,
    /// Low-pass resonance.
    pub lpf_resonance: f64,
    /// High-pass cutoff.
    pub hpf_freq: f64,
    /// High-pass cutoff sweep (signed).
    pub hpf_ramp: f64,

    /// Output gain.
    pub sound_volume: f64,
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Output sample size in bits.
    pub sample_size: u16,

    /// Noise buffer carried over from a previous generation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise: Option<Vec<f64>>,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            wave_shape: WaveShape::Square,
            attack: 0.0,
            sustain: 0.3,
            punch: 0.0,
            decay: 0.4,
            base_freq: 0.3,
            freq_limit: 0.0,
            freq_ramp: 0.0,
            freq_dramp: 0.0,
            vibrato_strength: 0.0,
            vibrato_speed: 0.0,
            vibrato_delay: 0.0,
            arp_mod: 0.0,
            arp_speed: 0.0,
            duty: 0.0,
            duty_ramp: 0.0,
            repeat_speed: 0.0,
            flanger_offset: 0.0,
            flanger_ramp: 0.0,
            lpf_freq: 1.0,
            lpf_ramp: 0.0,
            lpf_resonance: 0.0,
            hpf_freq: 0.0,
            hpf_ramp: 0.0,
            sound_volume: DEFAULT_SOUND_VOLUME,
            sample_rate: DEFAULT_SAMPLE_RATE,
            sample_size: DEFAULT_SAMPLE_SIZE,
            noise: None,
        }
    }
}

impl ParameterSet {
    /// Returns a copy with a different wave shape.
    #[must_use]
    pub fn with_wave_shape(mut self, wave_shape: WaveShape) -> Self {
        self.wave_shape = wave_shape;
        self
    }

    /// Returns a copy with new envelope lengths and punch.
    #[must_use]
    pub fn with_envelope(mut self, attack: f64, sustain: f64, punch: f64, decay: f64) -> Self {
        self.attack = attack;
        self.sustain = sustain;
        self.punch = punch;
        self.decay = decay;
        self
    }

    /// Returns a copy with a different start frequency.
    #[must_use]
    pub fn with_base_freq(mut self, base_freq: f64) -> Self {
        self.base_freq = base_freq;
        self
    }

    /// Returns a copy with a different frequency floor.
    #[must_use]
    pub fn with_freq_limit(mut self, freq_limit: f64) -> Self {
        self.freq_limit = freq_limit;
        self
    }

    /// Returns a copy with new frequency slide settings.
    #[must_use]
    pub fn with_freq_slide(mut self, ramp: f64, dramp: f64) -> Self {
        self.freq_ramp = ramp;
        self.freq_dramp = dramp;
        self
    }

    /// Returns a copy with new vibrato settings.
    #[must_use]
    pub fn with_vibrato(mut self, strength: f64, speed: f64, delay: f64) -> Self {
        self.vibrato_strength = strength;
        self.vibrato_speed = speed;
        self.vibrato_delay = delay;
        self
    }

    /// Returns a copy with new arpeggio settings.
    #[must_use]
    pub fn with_arpeggio(mut self, modulation: f64, speed: f64) -> Self {
        self.arp_mod = modulation;
        self.arp_speed = speed;
        self
    }

    /// Returns a copy with new duty cycle settings.
    #[must_use]
    pub fn with_duty(mut self, duty: f64, ramp: f64) -> Self {
        self.duty = duty;
        self.duty_ramp = ramp;
        self
    }

    /// Returns a copy with a different repeat speed.
    #[must_use]
    pub fn with_repeat_speed(mut self, repeat_speed: f64) -> Self {
        self.repeat_speed = repeat_speed;
        self
    }

    /// Returns a copy with new flanger settings.
    #[must_use]
    pub fn with_flanger(mut self, offset: f64, ramp: f64) -> Self {
        self.flanger_offset = offset;
        self.flanger_ramp = ramp;
        self
    }

    /// Returns a copy with new low-pass settings.
    #[must_use]
    pub fn with_low_pass(mut self, freq: f64, ramp: f64, resonance: f64) -> Self {
        self.lpf_freq = freq;
        self.lpf_ramp = ramp;
        self.lpf_resonance = resonance;
        self
    }

    /// Returns a copy with new high-pass settings.
    #[must_use]
    pub fn with_high_pass(mut self, freq: f64, ramp: f64) -> Self {
        self.hpf_freq = freq;
        self.hpf_ramp = ramp;
        self
    }

    /// Returns a copy with a different output gain.
    #[must_use]
    pub fn with_sound_volume(mut self, sound_volume: f64) -> Self {
        self.sound_volume = sound_volume;
        self
    }

    /// Returns a copy with a different output format.
    #[must_use]
    pub fn with_output_format(mut self, sample_rate: u32, sample_size: u16) -> Self {
        self.sample_rate = sample_rate;
        self.sample_size = sample_size;
        self
    }

    /// Returns a copy carrying the given noise buffer. An empty buffer clears it.
    #[must_use]
    pub fn with_noise(mut self, noise: Vec<f64>) -> Self {
        self.noise = if noise.is_empty() { None } else { Some(noise) };
        self
    }

    /// Returns the carried noise buffer if it has the expected length.
    pub fn noise_buffer(&self) -> Option<[f64; NOISE_BUFFER_LEN]> {
        self.noise
            .as_deref()
            .and_then(|noise| <[f64; NOISE_BUFFER_LEN]>::try_from(noise).ok())
    }

    /// Start frequency in Hz.
    pub fn base_frequency_hz(&self) -> f64 {
        to_external_base_freq(self.base_freq)
    }

    /// Mutable references to every tunable field, in [`TUNABLE_FIELD_NAMES`] order.
    pub fn tunable_mut(&mut self) -> [&mut f64; 22] {
        [
            &mut self.base_freq,
            &mut self.freq_ramp,
            &mut self.freq_dramp,
            &mut self.duty,
            &mut self.duty_ramp,
            &mut self.vibrato_strength,
            &mut self.vibrato_speed,
            &mut self.vibrato_delay,
            &mut self.attack,
            &mut self.sustain,
            &mut self.decay,
            &mut self.punch,
            &mut self.lpf_resonance,
            &mut self.lpf_freq,
            &mut self.lpf_ramp,
            &mut self.hpf_freq,
            &mut self.hpf_ramp,
            &mut self.flanger_offset,
            &mut self.flanger_ramp,
            &mut self.repeat_speed,
            &mut self.arp_speed,
            &mut self.arp_mod,
        ]
    }

    /// Values of every tunable field, in [`TUNABLE_FIELD_NAMES`] order.
    pub fn tunable(&self) -> [f64; 22] {
        let mut copy = self.clone();
        copy.tunable_mut().map(|value| *value)
    }
}

/// Converts a frequency in Hz to the normalised `base_freq` parameter.
///
/// Frequencies below the representable floor map to 0.0.
pub fn to_internal_base_freq(freq_hz: f64) -> f64 {
    (freq_hz / period_scale() - 0.001).max(0.0).sqrt()
}

/// Converts a normalised `base_freq` parameter to a frequency in Hz.
pub fn to_external_base_freq(base_freq: f64) -> f64 {
    period_scale() * (base_freq * base_freq + 0.001)
}

/// `OVERSAMPLING · 441`: the oversampled tick rate divided by the 100-tick
/// period numerator.
fn period_scale() -> f64 {
    OVERSAMPLING as f64 * (BASE_SAMPLE_RATE as f64 / 100.0)
}
