//! Transient run-state derived from a [`ParameterSet`] and the per-step
//! synthesis pipeline that advances it.
//!
//! The state splits into the part re-derived on every repeat trigger
//! (pitch, duty, arpeggio, vibrato, flanger offset, filter coefficients)
//! and the part that survives repeats (envelope, oscillator phase, filter
//! accumulators, flanger buffer, repeat counter).

use blipgen_spec::constants::{ENVELOPE_SCALE, OVERSAMPLING};
use blipgen_spec::{EnvelopeStage, ParameterSet, WaveShape};
use rand::Rng;

use super::filters::{HighPass, LowPass};
use super::flanger::Flanger;
use super::oscillators::{self, SawtoothDirection};
use crate::noise::{fill_white, NoiseBuffer};

/// Why a generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The envelope ran past the end of decay.
    EnvelopeFinished,
    /// The pitch slid below the configured frequency limit.
    FrequencyCutoff,
}

/// Outcome of one 44.1 kHz step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Step {
    /// Sum of the enveloped sub-samples for this step.
    Sample(f64),
    Finished(Termination),
}

/// Pitch, duty and arpeggio state; rebuilt by every repeat trigger.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PitchState {
    pub(crate) period: f64,
    pub(crate) period_max: f64,
    pub(crate) period_mult: f64,
    pub(crate) period_mult_slide: f64,
    pub(crate) duty: f64,
    pub(crate) duty_slide: f64,
    pub(crate) arp_mult: f64,
    pub(crate) arp_time: usize,
    pub(crate) arp_elapsed: usize,
}

impl PitchState {
    pub(crate) fn init_for_repeat(params: &ParameterSet) -> Self {
        let arp_mult = if params.arp_mod >= 0.0 {
            1.0 - params.arp_mod.powi(2) * 0.9
        } else {
            1.0 + params.arp_mod.powi(2) * 10.0
        };
        let arp_time = if params.arp_speed == 1.0 {
            0
        } else {
            countdown(params.arp_speed)
        };

        Self {
            period: 100.0 / (params.base_freq.powi(2) + 0.001),
            period_max: 100.0 / (params.freq_limit.powi(2) + 0.001),
            period_mult: 1.0 - params.freq_ramp.powi(3) * 0.01,
            period_mult_slide: -params.freq_dramp.powi(3) * 0.000001,
            duty: 0.5 - params.duty * 0.5,
            duty_slide: -params.duty_ramp * 0.00005,
            arp_mult,
            arp_time,
            arp_elapsed: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Vibrato {
    phase: f64,
    speed: f64,
    amplitude: f64,
}

impl Vibrato {
    fn new(params: &ParameterSet) -> Self {
        Self {
            phase: 0.0,
            speed: params.vibrato_speed.powi(2) * 0.01,
            amplitude: params.vibrato_strength * 0.5,
        }
    }

    fn apply(&mut self, period: f64) -> f64 {
        if self.amplitude > 0.0 {
            self.phase += self.speed;
            period * (1.0 + self.phase.sin() * self.amplitude)
        } else {
            period
        }
    }
}

/// Three-stage amplitude envelope.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Envelope {
    pub(crate) stage: EnvelopeStage,
    pub(crate) elapsed: usize,
    pub(crate) lengths: [usize; 3],
    punch: f64,
}

impl Envelope {
    pub(crate) fn new(params: &ParameterSet) -> Self {
        Self {
            stage: EnvelopeStage::Attack,
            elapsed: 0,
            lengths: [
                stage_length(params.attack),
                stage_length(params.sustain),
                stage_length(params.decay),
            ],
            punch: params.punch,
        }
    }

    /// Advances one step and returns the volume, or `None` past decay.
    fn advance(&mut self) -> Option<f64> {
        self.elapsed += 1;
        if self.elapsed > self.lengths[self.stage.index()] {
            self.elapsed = 0;
            self.stage = self.stage.next()?;
        }

        let length = self.lengths[self.stage.index()];
        let v = if length == 0 {
            0.0
        } else {
            self.elapsed as f64 / length as f64
        };

        Some(match self.stage {
            EnvelopeStage::Attack => v,
            EnvelopeStage::Sustain => 1.0 + (1.0 - v) * 2.0 * self.punch,
            EnvelopeStage::Decay => 1.0 - v,
        })
    }
}

/// Envelope stage length in steps: `floor(x² · 100000)`.
pub(crate) fn stage_length(x: f64) -> usize {
    (x * x * ENVELOPE_SCALE).floor() as usize
}

/// Shared arpeggio/repeat delay: `floor((1 - speed)² · 20000) + 32`.
fn countdown(speed: f64) -> usize {
    ((1.0 - speed).powi(2) * 20000.0).floor() as usize + 32
}

/// Repeat interval in steps; 0 disables repeats.
pub(crate) fn repeat_time(repeat_speed: f64) -> usize {
    if repeat_speed == 0.0 {
        0
    } else {
        countdown(repeat_speed)
    }
}

/// Everything one generation mutates while it runs.
#[derive(Debug, Clone)]
pub(crate) struct RunState {
    pub(crate) pitch: PitchState,
    pub(crate) vibrato: Vibrato,
    pub(crate) envelope: Envelope,
    pub(crate) low_pass: LowPass,
    pub(crate) high_pass: HighPass,
    pub(crate) flanger: Flanger,
    pub(crate) phase: usize,
    pub(crate) repeat_time: usize,
    pub(crate) repeat_elapsed: usize,
}

impl RunState {
    /// Fresh state for the start of a generation.
    pub(crate) fn new(params: &ParameterSet) -> Self {
        Self {
            pitch: PitchState::init_for_repeat(params),
            vibrato: Vibrato::new(params),
            envelope: Envelope::new(params),
            low_pass: LowPass::new(params),
            high_pass: HighPass::new(params),
            flanger: Flanger::new(params),
            phase: 0,
            repeat_time: repeat_time(params.repeat_speed),
            repeat_elapsed: 0,
        }
    }

    /// Re-derives vibrato, flanger offset and filter coefficients.
    fn set_for_repeat(&mut self, params: &ParameterSet) {
        self.vibrato = Vibrato::new(params);
        self.flanger.set_for_repeat(params);
        self.low_pass.set_for_repeat(params);
        self.high_pass.set_for_repeat(params);
    }

    /// Counts one step towards the next repeat and retriggers when due.
    ///
    /// Returns `true` when the pitch state was reset on this step.
    pub(crate) fn check_repeat(&mut self, params: &ParameterSet) -> bool {
        self.repeat_elapsed += 1;
        if self.repeat_time == 0 || self.repeat_elapsed < self.repeat_time {
            return false;
        }
        self.repeat_elapsed = 0;
        self.pitch = PitchState::init_for_repeat(params);
        self.set_for_repeat(params);
        true
    }

    /// Runs one step of the pipeline after the repeat check.
    pub(crate) fn synthesize_step<R: Rng + ?Sized>(
        &mut self,
        params: &ParameterSet,
        sawtooth: SawtoothDirection,
        noise: &mut NoiseBuffer,
        rng: &mut R,
    ) -> Step {
        let pitch = &mut self.pitch;

        pitch.arp_elapsed += 1;
        if pitch.arp_time != 0 && pitch.arp_elapsed >= pitch.arp_time {
            pitch.arp_time = 0;
            pitch.period *= pitch.arp_mult;
        }

        pitch.period_mult += pitch.period_mult_slide;
        pitch.period *= pitch.period_mult;
        if pitch.period > pitch.period_max {
            pitch.period = pitch.period_max;
            if params.freq_limit > 0.0 {
                return Step::Finished(Termination::FrequencyCutoff);
            }
        }

        let period = (self.vibrato.apply(pitch.period).floor() as usize).max(OVERSAMPLING);

        pitch.duty = (pitch.duty + pitch.duty_slide).clamp(0.0, 0.5);
        let duty = pitch.duty;

        let volume = match self.envelope.advance() {
            Some(volume) => volume,
            None => return Step::Finished(Termination::EnvelopeFinished),
        };

        self.flanger.advance();
        self.high_pass.advance();

        let mut sum = 0.0;
        for _ in 0..OVERSAMPLING {
            self.phase += 1;
            if self.phase >= period {
                self.phase %= period;
                // pink and brownian buffers are only built once per generation
                if params.wave_shape == WaveShape::WhiteNoise {
                    fill_white(rng, noise);
                }
            }

            let raw = oscillators::sample(params.wave_shape, self.phase, period, duty, sawtooth, noise);
            let (low, previous) = self.low_pass.process(raw);
            let high = self.high_pass.process(low, previous);
            sum += self.flanger.process(high) * volume;
        }

        Step::Sample(sum)
    }
}
