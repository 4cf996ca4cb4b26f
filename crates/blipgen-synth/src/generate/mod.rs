//! The synthesis engine.
//!
//! A [`Generator`] turns a [`ParameterSet`] into a finite sequence of
//! samples. Each call to [`Generator::generate`] rebuilds the run-state from
//! scratch and runs the pipeline until the envelope finishes or the pitch
//! hits the configured frequency limit.

mod filters;
mod flanger;
mod oscillators;
mod run_state;


use blipgen_spec::constants::{BASE_SAMPLE_RATE, OVERSAMPLING};
use blipgen_spec::{NoiseColor, ParameterSet, PresetRecord, WaveShape};
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::error::{AudioError, AudioResult};
use crate::noise::{NoiseBank, NoiseBuffer};
use crate::rng::create_component_rng;

use run_state::{RunState, Step};

pub use oscillators::SawtoothDirection;
pub use run_state::Termination;

/// Default iteration budget: 30 seconds of 44.1 kHz steps.
pub const DEFAULT_MAX_ITERATIONS: usize = 30 * BASE_SAMPLE_RATE as usize;

/// Caller-tunable generator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Maximum number of 44.1 kHz steps one generation may run.
    pub max_iterations: usize,
    /// Direction of the sawtooth ramp.
    pub sawtooth: SawtoothDirection,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            sawtooth: SawtoothDirection::default(),
        }
    }
}

/// Synthesises sample sequences from parameter sets.
///
/// One generator owns its run-state and its random source; it must not be
/// shared between concurrent generations.
#[derive(Debug, Clone)]
pub struct Generator<R = Pcg32> {
    config: GeneratorConfig,
    rng: R,
    noise_bank: NoiseBank,
    noise: Option<NoiseBuffer>,
    last_wave_shape: Option<WaveShape>,
    params: ParameterSet,
    state: RunState,
    termination: Option<Termination>,
}

impl Generator<Pcg32> {
    /// Creates a generator whose noise is seeded from `seed`.
    pub fn from_seed(seed: u32) -> Self {
        Self::new(create_component_rng(seed, "noise"))
    }
}

impl<R: Rng> Generator<R> {
    /// Creates a generator with the default configuration.
    pub fn new(rng: R) -> Self {
        Self::with_config(rng, GeneratorConfig::default())
    }

    /// Creates a generator with an explicit configuration.
    pub fn with_config(rng: R, config: GeneratorConfig) -> Self {
        let params = ParameterSet::default();
        let state = RunState::new(&params);
        Self {
            config,
            rng,
            noise_bank: NoiseBank::new(),
            noise: None,
            last_wave_shape: None,
            params,
            state,
            termination: None,
        }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Stores `params` and derives the initial run-state from it.
    pub fn init(&mut self, params: &ParameterSet) {
        self.params = params.clone();
        self.state = RunState::new(&self.params);
        self.termination = None;
    }

    /// Generates the full sample sequence for `params`.
    ///
    /// # Errors
    /// [`AudioError::GenerationExceededLimit`] when neither the envelope nor
    /// the frequency cutoff ends the sound within the iteration budget.
    pub fn generate(&mut self, params: &ParameterSet) -> AudioResult<Vec<f64>> {
        if self.config.max_iterations == 0 {
            return Err(AudioError::invalid_param(
                "max_iterations",
                "must be at least 1",
            ));
        }

        self.init(params);
        let mut noise = self.prepare_noise(params);

        tracing::debug!(
            wave_shape = %params.wave_shape,
            sample_rate = params.sample_rate,
            repeat_time = self.state.repeat_time,
            "generating"
        );

        let group = downsample_factor(params.sample_rate);
        let mut samples = Vec::new();
        let mut acc = 0.0;
        let mut acc_count = 0;
        let mut iterations = 0;

        let result = loop {
            if iterations == self.config.max_iterations {
                tracing::warn!(
                    limit = self.config.max_iterations,
                    "generation hit the iteration budget"
                );
                break Err(AudioError::GenerationExceededLimit {
                    limit: self.config.max_iterations,
                });
            }
            iterations += 1;

            if self.state.check_repeat(&self.params) {
                tracing::trace!(iteration = iterations, "repeat retrigger");
            }
            let step = self.state.synthesize_step(
                &self.params,
                self.config.sawtooth,
                &mut noise,
                &mut self.rng,
            );
            match step {
                Step::Sample(sum) => {
                    acc += sum;
                    acc_count += 1;
                    if acc_count == group {
                        let average = acc / group as f64;
                        samples.push(average / OVERSAMPLING as f64 * self.params.sound_volume);
                        acc = 0.0;
                        acc_count = 0;
                    }
                }
                Step::Finished(reason) => break Ok(reason),
            }
        };

        self.noise = Some(noise);
        let reason = result?;
        self.termination = Some(reason);
        tracing::debug!(
            samples = samples.len(),
            iterations,
            termination = ?reason,
            "generation finished"
        );
        Ok(samples)
    }

    /// Generates from a persisted record.
    ///
    /// # Errors
    /// [`AudioError::UnsupportedWaveShape`] when the record's wave shape is
    /// not a known code, plus everything [`Generator::generate`] returns.
    pub fn generate_record(&mut self, record: &PresetRecord) -> AudioResult<Vec<f64>> {
        let params = record.to_params()?;
        self.generate(&params)
    }

    /// Why the last successful generation stopped.
    pub fn last_termination(&self) -> Option<Termination> {
        self.termination
    }

    /// The noise buffer left by the last generation.
    ///
    /// Feed it back through [`ParameterSet::with_noise`] to keep noise
    /// continuity across generators.
    pub fn noise_buffer(&self) -> Option<&NoiseBuffer> {
        self.noise.as_ref()
    }

    /// Envelope stage lengths derived by the last [`Generator::init`].
    pub fn envelope_lengths(&self) -> [usize; 3] {
        self.state.envelope.lengths
    }

    /// Returns the noise buffer for this generation, rebuilding it when the
    /// wave shape changed or no buffer exists yet.
    fn prepare_noise(&mut self, params: &ParameterSet) -> NoiseBuffer {
        let shape_changed = self.last_wave_shape != Some(params.wave_shape);
        self.last_wave_shape = Some(params.wave_shape);

        if let (Some(noise), false) = (self.noise, shape_changed) {
            return noise;
        }
        if self.noise.is_none() {
            if let Some(carried) = params.noise_buffer() {
                return carried;
            }
        }
        let color = params.wave_shape.noise_color().unwrap_or(NoiseColor::White);
        self.noise_bank.generate(color, &mut self.rng)
    }
}

/// Number of 44.1 kHz steps averaged into one output sample.
///
/// Rates of zero or above the base rate produce one sample per step.
pub fn downsample_factor(sample_rate: u32) -> usize {
    if sample_rate == 0 || sample_rate >= BASE_SAMPLE_RATE {
        1
    } else {
        (BASE_SAMPLE_RATE / sample_rate) as usize
    }
}

/// Generates `params` with a fresh generator seeded from `seed`.
pub fn render(params: &ParameterSet, seed: u32) -> AudioResult<Vec<f64>> {
    Generator::from_seed(seed).generate(params)
}
