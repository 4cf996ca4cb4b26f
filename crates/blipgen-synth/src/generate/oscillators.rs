//! Per-sub-sample waveform evaluation.

use std::f64::consts::TAU;

use blipgen_spec::constants::NOISE_BUFFER_LEN;
use blipgen_spec::WaveShape;
use serde::{Deserialize, Serialize};

use crate::noise::NoiseBuffer;

/// Direction of the sawtooth ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SawtoothDirection {
    /// Starts high and ramps down each period.
    #[default]
    Falling,
    /// Starts low and ramps up each period.
    Rising,
}

/// Evaluates the oscillator at `phase` ticks into a period of `period` ticks.
///
/// `duty` is the square/triangle high fraction in `[0, 0.5]`. `period` must
/// be non-zero and `phase < period`.
pub(crate) fn sample(
    shape: WaveShape,
    phase: usize,
    period: usize,
    duty: f64,
    sawtooth: SawtoothDirection,
    noise: &NoiseBuffer,
) -> f64 {
    let fp = phase as f64 / period as f64;
    match shape {
        WaveShape::Square => {
            if fp < duty {
                0.5
            } else {
                -0.5
            }
        }
        WaveShape::Triangle => {
            if fp < duty {
                -1.0 + 2.0 * fp / duty
            } else {
                1.0 - 2.0 * (fp - duty) / (1.0 - duty)
            }
        }
        WaveShape::Sawtooth => match sawtooth {
            SawtoothDirection::Falling => 1.0 - fp * 2.0,
            SawtoothDirection::Rising => fp * 2.0 - 1.0,
        },
        WaveShape::Sine => (fp * TAU).sin(),
        WaveShape::WhiteNoise | WaveShape::PinkNoise | WaveShape::BrownianNoise => {
            noise[phase * NOISE_BUFFER_LEN / period]
        }
    }
}
