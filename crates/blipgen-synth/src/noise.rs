//! Noise buffers for the noise wave shapes.
//!
//! The oscillator reads noise from a short [`NoiseBuffer`] indexed by the
//! position within the current period. The bank fills that buffer with white,
//! pink or brownian noise. Pink and brownian noise are filtered white noise
//! and keep their filter state in the bank between fills.

use blipgen_spec::constants::NOISE_BUFFER_LEN;
use blipgen_spec::NoiseColor;
use rand::Rng;

/// A fixed-length block of noise samples in `[-1, 1]`.
pub type NoiseBuffer = [f64; NOISE_BUFFER_LEN];

/// Paul Kellet's pink noise filter, refined version.
#[derive(Debug, Clone, Default)]
struct PinkFilter {
    b: [f64; 7],
}

impl PinkFilter {
    fn process(&mut self, white: f64) -> f64 {
        let b = &mut self.b;
        b[0] = 0.99886 * b[0] + white * 0.0555179;
        b[1] = 0.99332 * b[1] + white * 0.0750759;
        b[2] = 0.96900 * b[2] + white * 0.1538520;
        b[3] = 0.86650 * b[3] + white * 0.3104856;
        b[4] = 0.55000 * b[4] + white * 0.5329522;
        b[5] = -0.7616 * b[5] - white * 0.0168980;
        let out = b.iter().sum::<f64>() + white * 0.5362;
        // b[6] is a one-sample delayed tap
        b[6] = white * 0.115926;
        (out * 0.11).clamp(-1.0, 1.0)
    }
}

/// Leaky integrator producing brownian noise.
#[derive(Debug, Clone, Default)]
struct BrownianFilter {
    last: f64,
}

impl BrownianFilter {
    fn process(&mut self, white: f64) -> f64 {
        self.last = (self.last + 0.02 * white) / 1.02;
        (self.last * 3.5).clamp(-1.0, 1.0)
    }
}

/// Source of noise buffers.
#[derive(Debug, Clone, Default)]
pub struct NoiseBank {
    pink: PinkFilter,
    brownian: BrownianFilter,
}

impl NoiseBank {
    /// Creates a bank with silent filter state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates a fresh buffer of the given color.
    pub fn generate<R: Rng + ?Sized>(&mut self, color: NoiseColor, rng: &mut R) -> NoiseBuffer {
        let mut buffer = [0.0; NOISE_BUFFER_LEN];
        self.fill(color, rng, &mut buffer);
        buffer
    }

    /// Overwrites `buffer` with noise of the given color.
    pub fn fill<R: Rng + ?Sized>(
        &mut self,
        color: NoiseColor,
        rng: &mut R,
        buffer: &mut NoiseBuffer,
    ) {
        for sample in buffer.iter_mut() {
            let white = white_sample(rng);
            *sample = match color {
                NoiseColor::White => white,
                NoiseColor::Pink => self.pink.process(white),
                NoiseColor::Brownian => self.brownian.process(white),
            };
        }
    }
}

/// Fills `buffer` with independent uniform samples in `[-1, 1)`.
pub fn fill_white<R: Rng + ?Sized>(rng: &mut R, buffer: &mut NoiseBuffer) {
    for sample in buffer.iter_mut() {
        *sample = white_sample(rng);
    }
}

fn white_sample<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen::<f64>() * 2.0 - 1.0
}
