//! One-pole low-pass and high-pass filters applied per sub-sample.

use blipgen_spec::ParameterSet;

/// Resonant one-pole low-pass.
///
/// Integrates the difference between the input and its own output. A
/// configured cutoff of exactly 1.0 bypasses it.
#[derive(Debug, Clone, Default)]
pub(crate) struct LowPass {
    w: f64,
    w_slide: f64,
    damping: f64,
    bypass: bool,
    pos: f64,
    delta: f64,
}

impl LowPass {
    pub(crate) fn new(params: &ParameterSet) -> Self {
        let mut filter = Self::default();
        filter.set_for_repeat(params);
        filter
    }

    /// Re-derives the coefficients, leaving the accumulator untouched.
    pub(crate) fn set_for_repeat(&mut self, params: &ParameterSet) {
        self.w = params.lpf_freq.powi(3) * 0.1;
        self.w_slide = 1.0 + params.lpf_ramp * 0.0001;
        self.damping = (5.0 / (1.0 + params.lpf_resonance.powi(2) * 20.0) * (0.01 + self.w)).min(0.8);
        self.bypass = params.lpf_freq == 1.0;
    }

    /// Filters one sub-sample and returns `(output, previous output)`.
    pub(crate) fn process(&mut self, input: f64) -> (f64, f64) {
        let previous = self.pos;
        self.w = (self.w * self.w_slide).clamp(0.0, 0.1);
        if self.bypass {
            self.pos = input;
            self.delta = 0.0;
        } else {
            self.delta += (input - self.pos) * self.w;
            self.delta -= self.delta * self.damping;
        }
        self.pos += self.delta;
        (self.pos, previous)
    }
}

/// One-pole high-pass over consecutive low-pass outputs.
#[derive(Debug, Clone, Default)]
pub(crate) struct HighPass {
    coeff: f64,
    slide: f64,
    acc: f64,
}

impl HighPass {
    pub(crate) fn new(params: &ParameterSet) -> Self {
        let mut filter = Self::default();
        filter.set_for_repeat(params);
        filter
    }

    /// Re-derives the coefficients, leaving the accumulator untouched.
    pub(crate) fn set_for_repeat(&mut self, params: &ParameterSet) {
        self.coeff = params.hpf_freq.powi(2) * 0.1;
        self.slide = 1.0 + params.hpf_ramp * 0.0003;
    }

    /// Applies the cutoff slide once per step.
    pub(crate) fn advance(&mut self) {
        self.coeff = (self.coeff * self.slide).clamp(0.00001, 0.1);
    }

    pub(crate) fn process(&mut self, current: f64, previous: f64) -> f64 {
        self.acc += current - previous;
        self.acc -= self.acc * self.coeff;
        self.acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_pass_bypass_passes_input() {
        let mut lp = LowPass::new(&ParameterSet::default());
        assert_eq!(lp.process(0.5), (0.5, 0.0));
        assert_eq!(lp.process(-0.25), (-0.25, 0.5));
    }

    #[test]
    fn test_low_pass_smooths_step() {
        let params = ParameterSet::default().with_low_pass(0.5, 0.0, 0.0);
        let mut lp = LowPass::new(&params);
        let (first, _) = lp.process(1.0);
        assert!(first > 0.0 && first < 0.1);
        let mut out = first;
        for _ in 0..5000 {
            out = lp.process(1.0).0;
        }
        assert!((out - 1.0).abs() < 0.05);
    }

    #[test]
    fn test_low_pass_damping_capped() {
        let params = ParameterSet::default().with_low_pass(0.99, 0.0, 0.0);
        let lp = LowPass::new(&params);
        assert!(lp.damping <= 0.8);
    }

    #[test]
    fn test_high_pass_blocks_dc() {
        let params = ParameterSet::default().with_high_pass(0.5, 0.0);
        let mut hp = HighPass::new(&params);
        let mut out = hp.process(1.0, 0.0);
        assert!(out > 0.9);
        for _ in 0..2000 {
            out = hp.process(1.0, 1.0);
        }
        assert!(out.abs() < 1e-3);
    }

    #[test]
    fn test_high_pass_coefficient_clamped() {
        let mut hp = HighPass::new(&ParameterSet::default());
        hp.advance();
        assert_eq!(hp.coeff, 0.00001);

        let params = ParameterSet::default().with_high_pass(1.0, 1.0);
        let mut hp = HighPass::new(&params);
        hp.advance();
        assert_eq!(hp.coeff, 0.1);
    }

    #[test]
    fn test_set_for_repeat_keeps_accumulators() {
        let params = ParameterSet::default().with_low_pass(0.5, 0.0, 0.3);
        let mut lp = LowPass::new(&params);
        lp.process(1.0);
        let pos = lp.pos;
        lp.set_for_repeat(&params);
        assert_eq!(lp.pos, pos);
    }
}
