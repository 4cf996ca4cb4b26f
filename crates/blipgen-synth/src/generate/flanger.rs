//! Flanger: a circular delay line mixed back into the signal.
//!
//! The delay is a whole number of sub-samples and the buffer length is
//! fixed.

use blipgen_spec::constants::FLANGER_BUFFER_LEN;
use blipgen_spec::ParameterSet;

#[derive(Debug, Clone)]
pub(crate) struct Flanger {
    buffer: Vec<f64>,
    pos: usize,
    offset: f64,
    slide: f64,
    delay: usize,
}

impl Flanger {
    pub(crate) fn new(params: &ParameterSet) -> Self {
        let mut flanger = Self {
            buffer: vec![0.0; FLANGER_BUFFER_LEN],
            pos: 0,
            offset: 0.0,
            slide: 0.0,
            delay: 0,
        };
        flanger.set_for_repeat(params);
        flanger
    }

    /// Re-derives the delay offset and its slide. The buffer is kept.
    pub(crate) fn set_for_repeat(&mut self, params: &ParameterSet) {
        self.offset = params.flanger_offset.powi(2) * 1020.0 * params.flanger_offset.signum();
        self.slide = params.flanger_ramp.powi(2) * params.flanger_ramp.signum();
        self.delay = delay_for(self.offset);
    }

    /// Applies the offset slide once per step.
    pub(crate) fn advance(&mut self) {
        self.offset += self.slide;
        self.delay = delay_for(self.offset);
    }

    /// Writes `sample` and mixes in the delayed signal.
    ///
    /// At zero delay the read hits the slot just written, doubling the input.
    pub(crate) fn process(&mut self, sample: f64) -> f64 {
        self.buffer[self.pos] = sample;
        let read = (self.pos + FLANGER_BUFFER_LEN - self.delay) % FLANGER_BUFFER_LEN;
        let out = sample + self.buffer[read];
        self.pos = (self.pos + 1) % FLANGER_BUFFER_LEN;
        out
    }
}

fn delay_for(offset: f64) -> usize {
    // `as` saturates, so NaN and huge offsets land on a valid index
    (offset.abs() as usize).min(FLANGER_BUFFER_LEN - 1)
}
