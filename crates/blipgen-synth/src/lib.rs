//! blipgen synthesis engine
//!
//! This crate turns a [`ParameterSet`](blipgen_spec::ParameterSet) into a
//! short procedural sound effect in the style of the classic sfxr family:
//! an oversampled oscillator feeding a three-stage envelope, low/high-pass
//! filters, a flanger and an optional repeat retrigger.
//!
//! # Determinism
//!
//! Generation is deterministic. Every random draw (preset randomisation,
//! mutation, noise) goes through a caller-supplied [`rand::Rng`]; the
//! convenience constructors use PCG32 with seeds derived via BLAKE3, so the
//! same seed always yields the same samples.
//!
//! # Example
//!
//! ```
//! use blipgen_spec::WaveShape;
//! use blipgen_synth::presets::tone;
//! use blipgen_synth::render;
//!
//! let samples = render(&tone(440.0, WaveShape::Square), 42).unwrap();
//! assert!(samples.len() > 44_000);
//! ```
//!
//! # Crate Structure
//!
//! - [`generate`] - The [`Generator`] and its per-run state
//! - [`presets`] - Preset constructors and mutation
//! - [`noise`] - White, pink and brownian noise buffers
//! - [`stream`] - Pull-based playback of a finished sample sequence
//! - [`pcm`] - PCM quantization, hashing and statistics
//! - [`rng`] - Deterministic RNG with seed derivation

pub mod error;
pub mod generate;
pub mod noise;
pub mod pcm;
pub mod presets;
pub mod rng;
pub mod stream;

// Re-export main types at crate root
pub use error::{AudioError, AudioResult};
pub use generate::{render, Generator, GeneratorConfig, SawtoothDirection, Termination};
pub use presets::{mutate, mutated, Preset};
pub use stream::{SampleStream, Streamer};
