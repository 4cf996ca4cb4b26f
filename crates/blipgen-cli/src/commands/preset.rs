//! Preset command implementation
//!
//! Builds a preset, optionally mutates it, and prints or writes its record.

use std::process::ExitCode;

use anyhow::Result;
use blipgen_spec::{ParameterSet, PresetRecord, WaveShape};
use blipgen_synth::presets::{mutate, tone, DEFAULT_TONE_HZ};
use blipgen_synth::rng::create_component_rng;
use blipgen_synth::Preset;

/// Builds the parameter set for `kind` from `seed`.
///
/// `frequency` only applies to tones. `wave` overrides the shape the preset
/// picked, and the tone shape defaults to square.
pub fn build_params(
    kind: Preset,
    seed: u32,
    wave: Option<WaveShape>,
    frequency: Option<f64>,
    mutations: usize,
) -> ParameterSet {
    let mut rng = create_component_rng(seed, "preset");
    let mut params = match kind {
        Preset::Tone => tone(
            frequency.unwrap_or(DEFAULT_TONE_HZ),
            wave.unwrap_or(WaveShape::Square),
        ),
        other => {
            let params = other.build(&mut rng);
            match wave {
                Some(shape) => params.with_wave_shape(shape),
                None => params,
            }
        }
    };
    for _ in 0..mutations {
        mutate(&mut params, &mut rng);
    }
    params
}

/// Builds the record for `kind`, named `name` or `<kind>-<seed>`.
pub fn build_record(
    kind: Preset,
    seed: u32,
    wave: Option<WaveShape>,
    frequency: Option<f64>,
    mutations: usize,
    name: Option<&str>,
) -> PresetRecord {
    let params = build_params(kind, seed, wave, frequency, mutations);
    let name = name
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}-{}", kind, seed));
    PresetRecord::from_params(&params, kind.as_str(), name)
}

/// Run the preset command
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(
    kind: Preset,
    seed: u32,
    wave: Option<WaveShape>,
    frequency: Option<f64>,
    mutations: usize,
    name: Option<&str>,
    output: Option<&str>,
) -> Result<ExitCode> {
    tracing::debug!(%kind, seed, mutations, "building preset");
    let record = build_record(kind, seed, wave, frequency, mutations, name);
    super::write_record(&record, output)?;
    Ok(ExitCode::SUCCESS)
}
