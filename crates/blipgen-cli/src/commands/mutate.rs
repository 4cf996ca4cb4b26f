//! Mutate command implementation
//!
//! Reads a preset record, perturbs its tunable fields, and writes the result.

use std::process::ExitCode;

use anyhow::{Context, Result};
use blipgen_spec::PresetRecord;
use blipgen_synth::mutated;
use blipgen_synth::rng::create_component_rng;
use colored::Colorize;

/// Applies `count` rounds of mutation to `record`.
///
/// # Errors
/// Fails when the record carries an unknown wave shape.
pub fn mutate_record(record: &PresetRecord, seed: u32, count: usize) -> Result<PresetRecord> {
    let mut params = record.to_params().context("Invalid preset record")?;
    let mut rng = create_component_rng(seed, "mutate");
    for _ in 0..count {
        params = mutated(&params, &mut rng);
    }
    Ok(PresetRecord::from_params(
        &params,
        record.category.clone(),
        record.name.clone(),
    ))
}

/// Run the mutate command
///
/// # Arguments
/// * `input` - Path to the preset record
/// * `output` - Output file path (default: stdout)
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(input: &str, seed: u32, count: usize, output: Option<&str>) -> Result<ExitCode> {
    let record = super::read_record(input)?;
    let mutated = mutate_record(&record, seed, count)?;
    super::write_record(&mutated, output)?;

    if let Some(path) = output {
        eprintln!(
            "{} Mutated {} into {}",
            "SUCCESS".green().bold(),
            input,
            path
        );
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blipgen_spec::ParameterSet;

    #[test]
    fn test_mutate_keeps_identity() {
        let record = PresetRecord::from_params(&ParameterSet::default(), "jump", "hop");
        let mutated = mutate_record(&record, 1, 2).unwrap();
        assert_eq!(mutated.category, "jump");
        assert_eq!(mutated.name, "hop");
        assert_eq!(mutated.wave_shape, record.wave_shape);
        assert_ne!(mutated, record);
    }

    #[test]
    fn test_zero_rounds_is_identity() {
        let record = PresetRecord::from_params(&ParameterSet::default(), "custom", "flat");
        assert_eq!(mutate_record(&record, 1, 0).unwrap(), record);
    }

    #[test]
    fn test_unknown_wave_shape_fails() {
        let mut record = PresetRecord::from_params(&ParameterSet::default(), "custom", "bad");
        record.wave_shape = 200;
        assert!(mutate_record(&record, 1, 1).is_err());
    }

    #[test]
    fn test_run_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.json");
        let output = dir.path().join("out.json");
        let record = PresetRecord::from_params(&ParameterSet::default(), "custom", "flat");
        std::fs::write(&input, record.to_json_string().unwrap()).unwrap();

        run(
            input.to_str().unwrap(),
            5,
            1,
            Some(output.to_str().unwrap()),
        )
        .unwrap();

        let written = super::super::read_record(output.to_str().unwrap()).unwrap();
        assert_eq!(written.name, "flat");
    }
}
