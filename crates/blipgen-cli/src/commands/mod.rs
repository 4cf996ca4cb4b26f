//! CLI command implementations.

pub mod list;
pub mod mutate;
pub mod preset;
pub mod render;

use std::fs;

use anyhow::{Context, Result};
use blipgen_spec::{BackendError, PresetRecord, SpecError};
use blipgen_synth::AudioError;

/// Code reported for failures that carry no backend error code.
pub const CLI_ERROR_CODE: &str = "CLI_001";

/// Reads a preset record from a JSON file.
pub fn read_record(path: &str) -> Result<PresetRecord> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read preset: {}", path))?;
    PresetRecord::from_json_str(&content).with_context(|| format!("Failed to parse preset: {}", path))
}

/// Writes a record as JSON to `output`, or to stdout when `output` is `None`.
pub fn write_record(record: &PresetRecord, output: Option<&str>) -> Result<()> {
    let json = record.to_json_string().context("Failed to serialize preset")?;
    match output {
        Some(path) => {
            fs::write(path, format!("{}\n", json))
                .with_context(|| format!("Failed to write preset: {}", path))?;
            tracing::info!(path, "wrote preset");
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Stable code of the first backend error in `err`'s cause chain.
pub fn error_code(err: &anyhow::Error) -> Option<&'static str> {
    err.chain().find_map(|cause| {
        if let Some(audio) = cause.downcast_ref::<AudioError>() {
            Some(audio.code())
        } else {
            cause.downcast_ref::<SpecError>().map(BackendError::code)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use blipgen_spec::ParameterSet;

    #[test]
    fn test_record_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coin.json");
        let path = path.to_str().unwrap();

        let record = PresetRecord::from_params(&ParameterSet::default(), "custom", "plain");
        write_record(&record, Some(path)).unwrap();
        assert_eq!(read_record(path).unwrap(), record);
    }

    #[test]
    fn test_read_record_missing_file() {
        let err = read_record("/nonexistent/blipgen/preset.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read preset"));
        assert_eq!(error_code(&err), None);
    }

    #[test]
    fn test_read_record_reports_format_code() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("old.json");
        let mut record = PresetRecord::from_params(&ParameterSet::default(), "custom", "old");
        record.format = "sfxr@0".to_string();
        std::fs::write(&path, serde_json::to_string(&record).unwrap()).unwrap();

        let err = read_record(path.to_str().unwrap()).unwrap_err();
        assert_eq!(error_code(&err), Some("SPEC_002"));
    }
}
