//! End-to-end generation scenarios.

use blipgen_spec::{BackendError, ParameterSet, PresetRecord, WaveShape};
use blipgen_synth::presets::{explosion, laser_shoot, pickup_coin, tone};
use blipgen_synth::rng::{create_component_rng, create_rng};
use blipgen_synth::{render, AudioError, Generator, GeneratorConfig, Termination};

#[test]
fn test_tone_square_440() {
    let params = tone(440.0, WaveShape::Square);
    let mut generator = Generator::from_seed(1);
    let samples = generator.generate(&params).expect("tone should generate");

    // one second of sustain plus the two zero-length stage transitions
    assert!(
        (44101..=44103).contains(&samples.len()),
        "unexpected length {}",
        samples.len()
    );
    assert_eq!(
        generator.last_termination(),
        Some(Termination::EnvelopeFinished)
    );

    // square at ±0.5 doubled by the zero-delay flanger, then halved by the
    // default volume
    let level = 0.5 * 2.0 * params.sound_volume;
    assert_eq!(level, 0.5);
    let peak = samples.iter().fold(0.0_f64, |m, s| m.max(s.abs()));
    assert!(peak <= level * 1.02, "peak {}", peak);

    let flat = samples
        .iter()
        .filter(|s| (s.abs() - level).abs() < level * 0.02)
        .count();
    assert!(
        flat * 10 >= samples.len() * 9,
        "only {} of {} samples sit at the square level",
        flat,
        samples.len()
    );

    // 440 cycles per second, two sign changes per cycle
    let flips = samples
        .windows(2)
        .filter(|w| (w[0] >= 0.0) != (w[1] >= 0.0))
        .count();
    assert!((860..=900).contains(&flips), "{} sign changes", flips);
}

#[test]
fn test_flanger_level_continuous_at_zero_offset() {
    let base = tone(440.0, WaveShape::Square).with_envelope(0.0, 0.05, 0.0, 0.0);
    let plain = render(&base, 3).expect("tone should generate");
    let nudged = render(&base.clone().with_flanger(1e-9, 0.0), 3).expect("tone should generate");

    assert_eq!(plain, nudged);
    let peak = plain.iter().fold(0.0_f64, |m, s| m.max(s.abs()));
    assert!((peak - 0.5).abs() < 0.01, "peak {}", peak);
}

#[test]
fn test_tone_half_period_spacing() {
    let samples = render(&tone(441.0, WaveShape::Square), 1).expect("tone should generate");
    let flips: Vec<usize> = samples
        .windows(2)
        .enumerate()
        .filter(|(_, w)| (w[0] >= 0.0) != (w[1] >= 0.0))
        .map(|(i, _)| i)
        .collect();

    // 441 Hz at 44.1 kHz: a sign change roughly every 50 samples
    for gap in flips.windows(2).map(|w| w[1] - w[0]) {
        assert!((48..=52).contains(&gap), "gap of {} samples", gap);
    }
}

#[test]
fn test_explosion_samples_are_finite() {
    for seed in 0..8 {
        let params = explosion(&mut create_component_rng(seed, "preset"));
        assert_eq!(params.wave_shape, WaveShape::WhiteNoise);

        let samples = render(&params, seed).expect("explosion should generate");
        assert!(!samples.is_empty());
        assert!(
            samples.iter().all(|s| s.is_finite()),
            "non-finite sample for seed {}",
            seed
        );
    }
}

#[test]
fn test_consecutive_generations_do_not_interfere() {
    let first = pickup_coin(&mut create_rng(5));
    let second = laser_shoot(&mut create_rng(6));

    let mut shared = Generator::from_seed(3);
    let a = shared.generate(&first).expect("should generate");
    let b = shared.generate(&second).expect("should generate");
    let a_again = shared.generate(&first).expect("should generate");

    let fresh = Generator::from_seed(3)
        .generate(&second)
        .expect("should generate");

    assert_eq!(a, a_again);
    assert_eq!(b, fresh);
}

#[test]
fn test_record_with_unknown_wave_shape() {
    let params = pickup_coin(&mut create_rng(1));
    let mut record = PresetRecord::from_params(&params, "pickup-coin", "coin");
    record.wave_shape = 7;
    let json = record.to_json_string().expect("should serialize");

    let parsed = PresetRecord::from_json_str(&json).expect("should parse");
    let err = Generator::from_seed(1).generate_record(&parsed).unwrap_err();

    assert!(matches!(err, AudioError::UnsupportedWaveShape { code: 7 }));
    assert_eq!(err.code(), "AUDIO_001");
}

#[test]
fn test_record_json_renders_like_params() {
    let params = laser_shoot(&mut create_rng(21));
    let json = PresetRecord::from_params(&params, "laser-shoot", "zap")
        .to_json_string()
        .expect("should serialize");
    let record = PresetRecord::from_json_str(&json).expect("should parse");

    let from_record = Generator::from_seed(4)
        .generate_record(&record)
        .expect("should generate");
    let from_params = render(&params, 4).expect("should generate");
    assert_eq!(from_record, from_params);
}

#[test]
fn test_iteration_budget_stops_long_sounds() {
    let config = GeneratorConfig {
        max_iterations: 1000,
        ..GeneratorConfig::default()
    };
    let mut generator = Generator::with_config(create_rng(1), config);
    let err = generator
        .generate(&tone(440.0, WaveShape::Sine))
        .unwrap_err();

    assert!(matches!(err, AudioError::GenerationExceededLimit { limit: 1000 }));
    assert_eq!(err.code(), "AUDIO_002");
}

#[test]
fn test_default_budget_fits_longest_envelope() {
    let params = ParameterSet::default()
        .with_wave_shape(WaveShape::Sine)
        .with_envelope(1.0, 1.0, 1.0, 1.0);
    let samples = render(&params, 1).expect("should fit the default budget");
    assert_eq!(samples.len(), 300_002);
}
