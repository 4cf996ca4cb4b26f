//! PCM quantization, hashing and sample statistics.
//!
//! WAV containers are left to the caller; these helpers stop at raw PCM.

use serde::{Deserialize, Serialize};

use crate::error::{AudioError, AudioResult};

/// Converts samples to raw PCM.
///
/// Samples are clipped to [-1, 1]. An 8-bit size produces unsigned bytes
/// centred on 128; a 16-bit size produces signed little-endian words.
///
/// # Errors
/// [`AudioError::InvalidParameter`] for any other sample size.
pub fn quantize(samples: &[f64], sample_size: u16) -> AudioResult<Vec<u8>> {
    match sample_size {
        8 => Ok(samples
            .iter()
            .map(|&sample| {
                let value = (sample.clamp(-1.0, 1.0) * 127.0).round() as i16;
                (value + 128) as u8
            })
            .collect()),
        16 => {
            let mut pcm = Vec::with_capacity(samples.len() * 2);
            for &sample in samples {
                let value = (sample.clamp(-1.0, 1.0) * 32767.0).round() as i16;
                pcm.extend_from_slice(&value.to_le_bytes());
            }
            Ok(pcm)
        }
        other => Err(AudioError::invalid_param(
            "sample_size",
            format!("expected 8 or 16 bits, got {}", other),
        )),
    }
}

/// BLAKE3 hex digest of the quantized PCM.
///
/// Two renders with the same hash are sample-identical at that bit depth.
pub fn pcm_hash(samples: &[f64], sample_size: u16) -> AudioResult<String> {
    let pcm = quantize(samples, sample_size)?;
    Ok(blake3::hash(&pcm).to_hex().to_string())
}

/// Summary statistics of a sample sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleStats {
    /// Number of samples.
    pub len: usize,
    /// Duration in seconds at the given sample rate.
    pub duration_seconds: f64,
    /// Largest absolute sample value.
    pub peak: f64,
    /// Root-mean-square level.
    pub rms: f64,
}

impl SampleStats {
    /// Computes statistics for `samples` played at `sample_rate`.
    pub fn from_samples(samples: &[f64], sample_rate: u32) -> Self {
        let len = samples.len();
        let peak = samples.iter().fold(0.0_f64, |peak, s| peak.max(s.abs()));
        let rms = if len == 0 {
            0.0
        } else {
            (samples.iter().map(|s| s * s).sum::<f64>() / len as f64).sqrt()
        };
        let duration_seconds = if sample_rate == 0 {
            0.0
        } else {
            len as f64 / sample_rate as f64
        };

        Self {
            len,
            duration_seconds,
            peak,
            rms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_16_bit() {
        let pcm = quantize(&[0.0, 1.0, -1.0, 2.0], 16).unwrap();
        assert_eq!(pcm.len(), 8);
        assert_eq!(i16::from_le_bytes([pcm[0], pcm[1]]), 0);
        assert_eq!(i16::from_le_bytes([pcm[2], pcm[3]]), 32767);
        assert_eq!(i16::from_le_bytes([pcm[4], pcm[5]]), -32767);
        assert_eq!(i16::from_le_bytes([pcm[6], pcm[7]]), 32767);
    }

    #[test]
    fn test_quantize_8_bit() {
        let pcm = quantize(&[0.0, 1.0, -1.0, -3.0, 0.5], 8).unwrap();
        assert_eq!(pcm, vec![128, 255, 1, 1, 192]);
    }

    #[test]
    fn test_quantize_rejects_other_sizes() {
        let err = quantize(&[0.0], 24).unwrap_err();
        assert!(matches!(err, AudioError::InvalidParameter { .. }));
    }

    #[test]
    fn test_pcm_hash_tracks_content() {
        let a = pcm_hash(&[0.1, 0.2, 0.3], 16).unwrap();
        let b = pcm_hash(&[0.1, 0.2, 0.3], 16).unwrap();
        let c = pcm_hash(&[0.1, 0.2, 0.31], 16).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_stats() {
        let stats = SampleStats::from_samples(&[0.5, -0.5, 0.5, -0.5], 4);
        assert_eq!(stats.len, 4);
        assert_eq!(stats.duration_seconds, 1.0);
        assert_eq!(stats.peak, 0.5);
        assert!((stats.rms - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_stats_empty() {
        let stats = SampleStats::from_samples(&[], 0);
        assert_eq!(stats.len, 0);
        assert_eq!(stats.duration_seconds, 0.0);
        assert_eq!(stats.peak, 0.0);
        assert_eq!(stats.rms, 0.0);
    }
}
