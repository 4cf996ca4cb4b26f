//! Determinism and numeric robustness across the parameter space.

use blipgen_spec::{ParameterSet, WaveShape};
use blipgen_synth::pcm::pcm_hash;
use blipgen_synth::presets::mutated;
use blipgen_synth::rng::{create_component_rng, create_rng};
use blipgen_synth::{render, Generator, Preset};

fn short(params: ParameterSet) -> ParameterSet {
    let mut params = params;
    params.attack = params.attack.min(0.1);
    params.sustain = params.sustain.min(0.2);
    params.decay = params.decay.min(0.2);
    params
}

#[test]
fn test_every_preset_is_deterministic() {
    for preset in Preset::ALL {
        let params = short(preset.build(&mut create_component_rng(77, "preset")));
        let a = render(&params, 77).expect("should generate");
        let b = render(&params, 77).expect("should generate");
        assert_eq!(
            pcm_hash(&a, 16).unwrap(),
            pcm_hash(&b, 16).unwrap(),
            "{} is not deterministic",
            preset
        );
    }
}

#[test]
fn test_noise_depends_on_seed() {
    for shape in [WaveShape::WhiteNoise, WaveShape::PinkNoise, WaveShape::BrownianNoise] {
        let params = ParameterSet::default()
            .with_wave_shape(shape)
            .with_envelope(0.0, 0.1, 0.0, 0.1);
        let a = render(&params, 1).expect("should generate");
        let b = render(&params, 2).expect("should generate");
        assert_ne!(a, b, "{} ignores the seed", shape);
    }
}

#[test]
fn test_presets_produce_finite_samples() {
    for seed in 0..4 {
        let mut rng = create_component_rng(seed, "preset");
        for preset in Preset::ALL {
            let params = short(preset.build(&mut rng));
            let samples = render(&params, seed).expect("should generate");
            assert!(
                samples.iter().all(|s| s.is_finite()),
                "{} seed {} produced a non-finite sample",
                preset,
                seed
            );
        }
    }
}

#[test]
fn test_mutated_presets_produce_finite_samples() {
    let mut rng = create_rng(99);
    for preset in Preset::ALL {
        let mut params = short(preset.build(&mut rng));
        for _ in 0..5 {
            params = mutated(&params, &mut rng);
        }
        let samples = render(&params, 99).expect("should generate");
        assert!(samples.iter().all(|s| s.is_finite()), "{}", preset);
    }
}

#[test]
fn test_boundary_values_are_finite() {
    let base = ParameterSet::default().with_envelope(0.0, 0.05, 0.0, 0.05);
    let boundaries = [
        base.clone().with_envelope(0.0, 0.0, 0.0, 0.0),
        base.clone().with_duty(0.0, 0.0),
        base.clone().with_duty(1.0, 0.0),
        base.clone().with_duty(1.0, 1.0),
        base.clone().with_low_pass(0.0, 0.0, 0.0),
        base.clone().with_low_pass(0.5, -1.0, 1.0),
        base.clone().with_high_pass(1.0, 1.0),
        base.clone().with_flanger(1.0, -1.0),
        base.clone().with_flanger(-1.0, 1.0),
        base.clone().with_base_freq(0.0).with_freq_slide(-1.0, -1.0),
        base.clone().with_base_freq(1.0).with_freq_slide(1.0, 1.0),
        base.clone().with_arpeggio(-1.0, 1.0),
        base.clone().with_arpeggio(1.0, 0.0),
        base.clone().with_vibrato(1.0, 1.0, 0.0),
        base.clone().with_repeat_speed(1.0),
    ];

    for shape in WaveShape::ALL {
        for (i, params) in boundaries.iter().enumerate() {
            let params = params.clone().with_wave_shape(shape);
            let samples = render(&params, 5).expect("should generate");
            assert!(
                samples.iter().all(|s| s.is_finite()),
                "{} boundary {} produced a non-finite sample",
                shape,
                i
            );
        }
    }
}

#[test]
fn test_zero_length_envelope_emits_two_samples() {
    let params = ParameterSet::default().with_envelope(0.0, 0.0, 0.0, 0.0);
    let samples = render(&params, 1).expect("should generate");
    assert_eq!(samples.len(), 2);
}

#[test]
fn test_generator_reuse_matches_fresh_generators() {
    let params = short(Preset::PowerUp.build(&mut create_rng(8)));
    let mut generator = Generator::from_seed(8);
    for _ in 0..3 {
        let reused = generator.generate(&params).expect("should generate");
        let fresh = render(&params, 8).expect("should generate");
        assert_eq!(reused, fresh);
    }
}
