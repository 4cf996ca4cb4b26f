//! Preset constructors and mutation.
//!
//! Every constructor starts from [`ParameterSet::default`] and perturbs it
//! with draws from the caller's random source. Constructors never fail.

use std::fmt;
use std::str::FromStr;

use blipgen_spec::constants::BASE_SAMPLE_RATE;
use blipgen_spec::{to_internal_base_freq, ParameterSet, WaveShape};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Frequency used by [`Preset::Tone`] when built without arguments.
pub const DEFAULT_TONE_HZ: f64 = 440.0;

/// The preset families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    PickupCoin,
    LaserShoot,
    Explosion,
    PowerUp,
    HitHurt,
    Jump,
    BlipSelect,
    Synth,
    Random,
    Tone,
}

impl Preset {
    /// All presets in menu order.
    pub const ALL: [Preset; 10] = [
        Preset::PickupCoin,
        Preset::LaserShoot,
        Preset::Explosion,
        Preset::PowerUp,
        Preset::HitHurt,
        Preset::Jump,
        Preset::BlipSelect,
        Preset::Synth,
        Preset::Random,
        Preset::Tone,
    ];

    /// Returns the kebab-case name, also used as the record category.
    pub fn as_str(self) -> &'static str {
        match self {
            Preset::PickupCoin => "pickup-coin",
            Preset::LaserShoot => "laser-shoot",
            Preset::Explosion => "explosion",
            Preset::PowerUp => "power-up",
            Preset::HitHurt => "hit-hurt",
            Preset::Jump => "jump",
            Preset::BlipSelect => "blip-select",
            Preset::Synth => "synth",
            Preset::Random => "random",
            Preset::Tone => "tone",
        }
    }

    /// Builds a parameter set for this preset.
    ///
    /// [`Preset::Tone`] ignores `rng` and builds a square wave at
    /// [`DEFAULT_TONE_HZ`]; call [`tone`] for other pitches.
    pub fn build<R: Rng + ?Sized>(self, rng: &mut R) -> ParameterSet {
        match self {
            Preset::PickupCoin => pickup_coin(rng),
            Preset::LaserShoot => laser_shoot(rng),
            Preset::Explosion => explosion(rng),
            Preset::PowerUp => power_up(rng),
            Preset::HitHurt => hit_hurt(rng),
            Preset::Jump => jump(rng),
            Preset::BlipSelect => blip_select(rng),
            Preset::Synth => synth(rng),
            Preset::Random => random(rng),
            Preset::Tone => tone(DEFAULT_TONE_HZ, WaveShape::Square),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .iter()
            .copied()
            .find(|preset| preset.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Preset::ALL.iter().map(|p| p.as_str()).collect();
                format!("unknown preset '{}' (expected one of: {})", s, names.join(", "))
            })
    }
}

/// Uniform integer in `0..=max`.
fn rnd<R: Rng + ?Sized>(rng: &mut R, max: u32) -> u32 {
    rng.gen_range(0..=max)
}

/// Uniform real in `[0, range)`.
fn frnd<R: Rng + ?Sized>(rng: &mut R, range: f64) -> f64 {
    rng.gen::<f64>() * range
}

/// Uniform real in `[-1, 1)`.
fn signed<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    frnd(rng, 2.0) - 1.0
}

/// Pickup or coin chime: bright, short, optionally with an arpeggio jump.
pub fn pickup_coin<R: Rng + ?Sized>(rng: &mut R) -> ParameterSet {
    let mut p = ParameterSet::default();
    p.base_freq = 0.4 + frnd(rng, 0.5);
    p.attack = 0.0;
    p.sustain = frnd(rng, 0.1);
    p.decay = 0.1 + frnd(rng, 0.4);
    p.punch = 0.3 + frnd(rng, 0.3);
    if rnd(rng, 1) == 1 {
        p.arp_speed = 0.5 + frnd(rng, 0.2);
        p.arp_mod = 0.2 + frnd(rng, 0.4);
    }
    p
}

/// Laser or shot: a fast downward sweep.
pub fn laser_shoot<R: Rng + ?Sized>(rng: &mut R) -> ParameterSet {
    const SHAPES: [WaveShape; 3] = [WaveShape::Square, WaveShape::Sawtooth, WaveShape::Sine];

    let mut p = ParameterSet::default();
    let mut shape = rnd(rng, 2);
    if shape == 2 && rnd(rng, 1) == 1 {
        shape = rnd(rng, 1);
    }
    p.wave_shape = SHAPES[shape as usize];

    p.base_freq = 0.5 + frnd(rng, 0.5);
    p.freq_limit = (p.base_freq - 0.2 - frnd(rng, 0.6)).max(0.2);
    p.freq_ramp = -0.15 - frnd(rng, 0.2);
    if rnd(rng, 2) == 0 {
        p.base_freq = 0.3 + frnd(rng, 0.6);
        p.freq_limit = frnd(rng, 0.1);
        p.freq_ramp = -0.35 - frnd(rng, 0.3);
    }

    if rnd(rng, 1) == 1 {
        p.duty = frnd(rng, 0.5);
        p.duty_ramp = frnd(rng, 0.2);
    } else {
        p.duty = 0.4 + frnd(rng, 0.5);
        p.duty_ramp = -frnd(rng, 0.7);
    }

    p.attack = 0.0;
    p.sustain = 0.1 + frnd(rng, 0.2);
    p.decay = frnd(rng, 0.4);
    if rnd(rng, 1) == 1 {
        p.punch = frnd(rng, 0.3);
    }
    if rnd(rng, 2) == 0 {
        p.flanger_offset = frnd(rng, 0.2);
        p.flanger_ramp = -frnd(rng, 0.2);
    }
    if rnd(rng, 1) == 1 {
        p.hpf_freq = frnd(rng, 0.3);
    }
    p
}

/// Explosion: white noise with a falling pitch and optional repeat.
pub fn explosion<R: Rng + ?Sized>(rng: &mut R) -> ParameterSet {
    let mut p = ParameterSet::default().with_wave_shape(WaveShape::WhiteNoise);
    if rnd(rng, 1) == 1 {
        p.base_freq = 0.1 + frnd(rng, 0.4);
        p.freq_ramp = -0.1 + frnd(rng, 0.4);
    } else {
        p.base_freq = 0.2 + frnd(rng, 0.7);
        p.freq_ramp = -0.2 - frnd(rng, 0.2);
    }
    p.base_freq *= p.base_freq;
    if rnd(rng, 4) == 0 {
        p.freq_ramp = 0.0;
    }
    if rnd(rng, 2) == 0 {
        p.repeat_speed = 0.3 + frnd(rng, 0.5);
    }

    p.attack = 0.0;
    p.sustain = 0.1 + frnd(rng, 0.3);
    p.decay = frnd(rng, 0.5);
    if rnd(rng, 1) == 0 {
        p.flanger_offset = -0.3 + frnd(rng, 0.9);
        p.flanger_ramp = -frnd(rng, 0.3);
    }
    p.punch = 0.2 + frnd(rng, 0.6);
    if rnd(rng, 1) == 1 {
        p.vibrato_strength = frnd(rng, 0.7);
        p.vibrato_speed = frnd(rng, 0.6);
    }
    if rnd(rng, 2) == 0 {
        p.arp_speed = 0.6 + frnd(rng, 0.3);
        p.arp_mod = 0.8 - frnd(rng, 1.6);
    }
    p
}

/// Power-up: a rising sweep, sometimes repeated.
pub fn power_up<R: Rng + ?Sized>(rng: &mut R) -> ParameterSet {
    let mut p = ParameterSet::default();
    if rnd(rng, 1) == 1 {
        p.wave_shape = WaveShape::Sawtooth;
    } else {
        p.duty = frnd(rng, 0.6);
    }

    p.base_freq = 0.2 + frnd(rng, 0.3);
    if rnd(rng, 1) == 1 {
        p.freq_ramp = 0.1 + frnd(rng, 0.4);
        p.repeat_speed = 0.4 + frnd(rng, 0.4);
    } else {
        p.freq_ramp = 0.05 + frnd(rng, 0.2);
        if rnd(rng, 1) == 1 {
            p.vibrato_strength = frnd(rng, 0.7);
            p.vibrato_speed = frnd(rng, 0.6);
        }
    }

    p.attack = 0.0;
    p.sustain = frnd(rng, 0.4);
    p.decay = 0.1 + frnd(rng, 0.4);
    p
}

/// Hit or hurt: a short, harsh downward blip.
pub fn hit_hurt<R: Rng + ?Sized>(rng: &mut R) -> ParameterSet {
    const SHAPES: [WaveShape; 3] = [WaveShape::Square, WaveShape::Sawtooth, WaveShape::WhiteNoise];

    let mut p = ParameterSet::default();
    p.wave_shape = SHAPES[rnd(rng, 2) as usize];
    if p.wave_shape == WaveShape::Square {
        p.duty = frnd(rng, 0.6);
    }

    p.base_freq = 0.2 + frnd(rng, 0.6);
    p.freq_ramp = -0.3 - frnd(rng, 0.4);
    p.attack = 0.0;
    p.sustain = frnd(rng, 0.1);
    p.decay = 0.1 + frnd(rng, 0.2);
    if rnd(rng, 1) == 1 {
        p.hpf_freq = frnd(rng, 0.3);
    }
    p
}

/// Jump: a square wave sliding upward.
pub fn jump<R: Rng + ?Sized>(rng: &mut R) -> ParameterSet {
    let mut p = ParameterSet::default().with_wave_shape(WaveShape::Square);
    p.duty = frnd(rng, 0.6);
    p.base_freq = 0.3 + frnd(rng, 0.3);
    p.freq_ramp = 0.1 + frnd(rng, 0.2);

    p.attack = 0.0;
    p.sustain = 0.1 + frnd(rng, 0.3);
    p.decay = 0.1 + frnd(rng, 0.2);
    if rnd(rng, 1) == 1 {
        p.hpf_freq = frnd(rng, 0.3);
    }
    if rnd(rng, 1) == 1 {
        p.lpf_freq = 1.0 - frnd(rng, 0.6);
    }
    p
}

/// Menu blip: a very short flat tone.
pub fn blip_select<R: Rng + ?Sized>(rng: &mut R) -> ParameterSet {
    let mut p = ParameterSet::default();
    if rnd(rng, 1) == 1 {
        p.wave_shape = WaveShape::Sawtooth;
    } else {
        p.duty = frnd(rng, 0.6);
    }
    p.base_freq = 0.2 + frnd(rng, 0.4);

    p.attack = 0.0;
    p.sustain = 0.1 + frnd(rng, 0.1);
    p.decay = frnd(rng, 0.2);
    p.hpf_freq = 0.1;
    p
}

/// Synth note: one of three fixed pitches with a filtered, plucky envelope.
pub fn synth<R: Rng + ?Sized>(rng: &mut R) -> ParameterSet {
    const PITCHES: [f64; 3] = [0.272_317_136_093_153_9, 0.192_556_925_615_243_82, 0.136_157_787_468_151_13];
    const ARP_MODS: [f64; 7] = [0.0, 0.0, 0.0, 0.0, -0.3162, 0.7454, 0.7454];

    let mut p = ParameterSet::default();
    p.wave_shape = if rnd(rng, 1) == 1 {
        WaveShape::Sawtooth
    } else {
        WaveShape::Square
    };
    p.base_freq = PITCHES[rnd(rng, 2) as usize];

    p.attack = if rnd(rng, 4) > 3 { frnd(rng, 0.5) } else { 0.0 };
    p.sustain = frnd(rng, 1.0);
    p.punch = frnd(rng, 1.0);
    p.decay = frnd(rng, 0.9) + 0.1;

    p.arp_mod = ARP_MODS[rnd(rng, 6) as usize];
    p.arp_speed = frnd(rng, 0.5) + 0.4;
    p.duty = frnd(rng, 1.0);
    p.duty_ramp = if rnd(rng, 2) == 2 { frnd(rng, 1.0) } else { 0.0 };

    p.lpf_freq = if rnd(rng, 1) == 1 {
        frnd(rng, 1.0) * frnd(rng, 1.0)
    } else {
        1.0
    };
    p.lpf_ramp = signed(rng);
    p.lpf_resonance = frnd(rng, 1.0);
    p.hpf_freq = if rnd(rng, 3) == 3 { frnd(rng, 1.0) } else { 0.0 };
    p.hpf_ramp = if rnd(rng, 3) == 3 { frnd(rng, 1.0) } else { 0.0 };
    p
}

/// Fully random sound.
///
/// Signed parameters draw from `[-1, 1)`; parameters whose meaning has no
/// negative side (envelope, duty, vibrato, resonance, repeat and arpeggio
/// speed) draw from `[0, 1)`.
pub fn random<R: Rng + ?Sized>(rng: &mut R) -> ParameterSet {
    let mut p = ParameterSet::default();
    p.wave_shape = WaveShape::ALL[rnd(rng, 6) as usize];

    p.base_freq = signed(rng).powi(2);
    if rnd(rng, 1) == 1 {
        p.base_freq = (signed(rng).powi(3) + 0.5).clamp(0.0, 1.0);
    }
    p.freq_limit = 0.0;
    p.freq_ramp = signed(rng).powi(5);
    if p.base_freq > 0.7 && p.freq_ramp > 0.2 {
        p.freq_ramp = -p.freq_ramp;
    }
    if p.base_freq < 0.2 && p.freq_ramp < -0.05 {
        p.freq_ramp = -p.freq_ramp;
    }
    p.freq_dramp = signed(rng).powi(3);

    p.duty = frnd(rng, 1.0);
    p.duty_ramp = signed(rng).powi(3);
    p.vibrato_strength = frnd(rng, 1.0).powi(3);
    p.vibrato_speed = frnd(rng, 1.0);
    p.vibrato_delay = frnd(rng, 1.0);

    p.attack = frnd(rng, 1.0).powi(3);
    p.sustain = frnd(rng, 1.0).powi(2);
    p.decay = frnd(rng, 1.0);
    p.punch = frnd(rng, 0.8).powi(2);
    if p.attack + p.sustain + p.decay < 0.2 {
        p.sustain += 0.2 + frnd(rng, 0.3);
        p.decay += 0.2 + frnd(rng, 0.3);
    }

    p.lpf_resonance = frnd(rng, 1.0);
    p.lpf_freq = 1.0 - frnd(rng, 1.0).powi(3);
    p.lpf_ramp = signed(rng).powi(3);
    if p.lpf_freq < 0.1 && p.lpf_ramp < -0.05 {
        p.lpf_ramp = -p.lpf_ramp;
    }
    p.hpf_freq = frnd(rng, 1.0).powi(5);
    p.hpf_ramp = signed(rng).powi(5);

    p.flanger_offset = signed(rng).powi(3);
    p.flanger_ramp = signed(rng).powi(3);
    p.repeat_speed = frnd(rng, 1.0);
    p.arp_speed = frnd(rng, 1.0);
    p.arp_mod = signed(rng);
    p
}

/// A sustained single-pitch tone at `frequency_hz`.
///
/// The sustain stage lasts one second at the base sample rate; there is no
/// attack, decay or punch.
pub fn tone(frequency_hz: f64, wave_shape: WaveShape) -> ParameterSet {
    let sustain = (BASE_SAMPLE_RATE as f64 / 100_000.0).sqrt();
    ParameterSet::default()
        .with_wave_shape(wave_shape)
        .with_base_freq(to_internal_base_freq(frequency_hz))
        .with_envelope(0.0, sustain, 0.0, 0.0)
}

/// Perturbs every tunable field with probability 1/2 by a uniform amount
/// in `[-0.05, 0.05)`.
pub fn mutate<R: Rng + ?Sized>(params: &mut ParameterSet, rng: &mut R) {
    for field in params.tunable_mut() {
        if rng.gen_bool(0.5) {
            *field += frnd(rng, 0.1) - 0.05;
        }
    }
}

/// Returns a mutated copy, leaving `params` untouched.
#[must_use]
pub fn mutated<R: Rng + ?Sized>(params: &ParameterSet, rng: &mut R) -> ParameterSet {
    let mut copy = params.clone();
    mutate(&mut copy, rng);
    copy
}
