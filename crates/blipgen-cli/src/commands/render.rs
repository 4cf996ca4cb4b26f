//! Render command implementation
//!
//! Generates a preset or a record file and reports sample statistics and
//! the PCM hash.

use std::process::ExitCode;

use anyhow::{Context, Result};
use blipgen_spec::PresetRecord;

use super::{error_code, CLI_ERROR_CODE};
use blipgen_synth::pcm::{pcm_hash, SampleStats};
use blipgen_synth::rng::create_component_rng;
use blipgen_synth::{Generator, GeneratorConfig, SawtoothDirection, Termination};
use colored::Colorize;
use serde_json::json;

/// Output-format overrides applied to the record before generation.
#[derive(Debug, Clone, Default)]
pub struct FormatOverrides {
    pub sample_rate: Option<u32>,
    pub sample_size: Option<u16>,
    pub volume: Option<f64>,
}

impl FormatOverrides {
    fn apply(&self, record: &mut PresetRecord) {
        if let Some(rate) = self.sample_rate {
            record.sample_rate = rate;
        }
        if let Some(size) = self.sample_size {
            record.sample_size = size;
        }
        if let Some(volume) = self.volume {
            record.sound_volume = volume;
        }
    }
}

/// Result of one render.
#[derive(Debug, Clone)]
pub struct RenderSummary {
    pub name: String,
    pub stats: SampleStats,
    pub pcm_hash: String,
    pub termination: Option<Termination>,
}

/// Renders `record` with a generator seeded from `seed`.
pub fn render_record(
    record: &PresetRecord,
    seed: u32,
    config: GeneratorConfig,
    overrides: &FormatOverrides,
) -> Result<RenderSummary> {
    let mut record = record.clone();
    overrides.apply(&mut record);

    let rng = create_component_rng(seed, "noise");
    let mut generator = Generator::with_config(rng, config);
    let samples = generator
        .generate_record(&record)
        .with_context(|| format!("Failed to render '{}'", record.name))?;

    Ok(RenderSummary {
        name: record.name.clone(),
        stats: SampleStats::from_samples(&samples, record.sample_rate),
        pcm_hash: pcm_hash(&samples, record.sample_size)?,
        termination: generator.last_termination(),
    })
}

/// Builds the generator configuration from command-line values.
pub fn generator_config(max_iterations: Option<usize>, rising_saw: bool) -> GeneratorConfig {
    let defaults = GeneratorConfig::default();
    GeneratorConfig {
        max_iterations: max_iterations.unwrap_or(defaults.max_iterations),
        sawtooth: if rising_saw {
            SawtoothDirection::Rising
        } else {
            SawtoothDirection::Falling
        },
    }
}

/// JSON document describing a failed render.
pub fn error_json(name: &str, err: &anyhow::Error) -> serde_json::Value {
    json!({
        "name": name,
        "ok": false,
        "error": {
            "code": error_code(err).unwrap_or(CLI_ERROR_CODE),
            "message": format!("{:#}", err),
        },
    })
}

/// Run the render command
///
/// With `json_output`, render failures are reported as a JSON error
/// document rather than propagated.
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(
    record: &PresetRecord,
    seed: u32,
    config: GeneratorConfig,
    overrides: &FormatOverrides,
    json_output: bool,
) -> Result<ExitCode> {
    let summary = match render_record(record, seed, config, overrides) {
        Ok(summary) => summary,
        Err(e) if json_output => {
            println!("{}", serde_json::to_string_pretty(&error_json(&record.name, &e))?);
            return Ok(ExitCode::from(1));
        }
        Err(e) => return Err(e),
    };

    if json_output {
        let output = json!({
            "name": summary.name,
            "ok": true,
            "stats": summary.stats,
            "pcm_hash": summary.pcm_hash,
            "termination": summary.termination.map(termination_name),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{} {}", "Rendered:".cyan().bold(), summary.name);
        println!("  samples:   {}", summary.stats.len);
        println!("  duration:  {:.3} s", summary.stats.duration_seconds);
        println!("  peak:      {:.4}", summary.stats.peak);
        println!("  rms:       {:.4}", summary.stats.rms);
        if let Some(termination) = summary.termination {
            println!("  ended by:  {}", termination_name(termination));
        }
        println!("  pcm hash:  {}", summary.pcm_hash.dimmed());
    }

    Ok(ExitCode::SUCCESS)
}

fn termination_name(termination: Termination) -> &'static str {
    match termination {
        Termination::EnvelopeFinished => "envelope",
        Termination::FrequencyCutoff => "frequency-cutoff",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::preset::build_record;
    use blipgen_synth::Preset;

    #[test]
    fn test_render_is_reproducible() {
        let record = build_record(Preset::LaserShoot, 2, None, None, 0, None);
        let config = generator_config(None, false);
        let a = render_record(&record, 2, config.clone(), &FormatOverrides::default()).unwrap();
        let b = render_record(&record, 2, config, &FormatOverrides::default()).unwrap();
        assert_eq!(a.pcm_hash, b.pcm_hash);
        assert_eq!(a.stats, b.stats);
        assert!(a.termination.is_some());
    }

    #[test]
    fn test_overrides_change_format() {
        let record = build_record(Preset::Tone, 0, None, None, 0, None);
        let overrides = FormatOverrides {
            sample_rate: Some(22050),
            sample_size: Some(8),
            volume: Some(0.25),
        };
        let full = render_record(&record, 0, generator_config(None, false), &FormatOverrides::default())
            .unwrap();
        let half = render_record(&record, 0, generator_config(None, false), &overrides).unwrap();

        assert_eq!(half.stats.len, full.stats.len / 2);
        assert!((half.stats.duration_seconds - full.stats.duration_seconds).abs() < 0.01);
        assert!(half.stats.peak < full.stats.peak);
    }

    #[test]
    fn test_iteration_budget_surfaces_error() {
        let record = build_record(Preset::Tone, 0, None, None, 0, None);
        let err = render_record(
            &record,
            0,
            generator_config(Some(100), false),
            &FormatOverrides::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("Failed to render"));
        assert_eq!(error_code(&err), Some("AUDIO_002"));

        let report = error_json(&record.name, &err);
        assert_eq!(report["ok"], false);
        assert_eq!(report["error"]["code"], "AUDIO_002");
        assert!(report["error"]["message"]
            .as_str()
            .unwrap()
            .contains("100 iterations"));
    }

    #[test]
    fn test_unknown_wave_shape_code() {
        let mut record = build_record(Preset::BlipSelect, 0, None, None, 0, None);
        record.wave_shape = 7;
        let err = render_record(&record, 0, generator_config(None, false), &FormatOverrides::default())
            .unwrap_err();
        assert_eq!(error_code(&err), Some("AUDIO_001"));
    }

    #[test]
    fn test_uncoded_error_falls_back_to_cli_code() {
        let err = anyhow::anyhow!("disk on fire");
        assert_eq!(error_json("x", &err)["error"]["code"], CLI_ERROR_CODE);
    }

    #[test]
    fn test_bad_sample_size_rejected() {
        let record = build_record(Preset::BlipSelect, 0, None, None, 0, None);
        let overrides = FormatOverrides {
            sample_size: Some(12),
            ..FormatOverrides::default()
        };
        let err = render_record(&record, 0, generator_config(None, false), &overrides).unwrap_err();
        assert_eq!(error_code(&err), Some("AUDIO_003"));
    }
}
