//! CLI argument definitions for the blipgen command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use blipgen_spec::WaveShape;
use blipgen_synth::Preset;
use clap::{Args, Parser, Subcommand};

/// blipgen - procedural retro sound effects
#[derive(Parser)]
#[command(name = "blipgen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by commands that build a preset.
#[derive(Args, Debug, Clone)]
pub(crate) struct SoundArgs {
    /// Seed for preset randomisation and noise
    #[arg(long, default_value_t = 0)]
    pub seed: u32,

    /// Override the wave shape (square, triangle, sawtooth, sine, white-noise, pink-noise, brownian-noise)
    #[arg(long)]
    pub wave: Option<WaveShape>,

    /// Tone frequency in Hz (tone preset only)
    #[arg(long)]
    pub frequency: Option<f64>,

    /// Number of mutation rounds applied after building
    #[arg(long, default_value_t = 0)]
    pub mutations: usize,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Build a preset and print its record as JSON
    Preset {
        /// Preset kind (see `blipgen list`)
        kind: Preset,

        #[command(flatten)]
        sound: SoundArgs,

        /// Record name (default: <kind>-<seed>)
        #[arg(long)]
        name: Option<String>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Write a mutated copy of a preset record
    Mutate {
        /// Path to the preset record
        input: String,

        /// Seed for the mutation draws
        #[arg(long, default_value_t = 0)]
        seed: u32,

        /// Number of mutation rounds
        #[arg(long, default_value_t = 1)]
        count: usize,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Generate a sound and report its statistics and PCM hash
    Render {
        /// Preset kind to build and render
        #[arg(required_unless_present = "input", conflicts_with = "input")]
        kind: Option<Preset>,

        /// Render a preset record file instead of a preset kind
        #[arg(short, long)]
        input: Option<String>,

        #[command(flatten)]
        sound: SoundArgs,

        /// Maximum number of synthesis steps before giving up
        #[arg(long)]
        max_iterations: Option<usize>,

        /// Output sample rate in Hz
        #[arg(long)]
        sample_rate: Option<u32>,

        /// PCM sample size in bits (8 or 16)
        #[arg(long, value_parser = parse_sample_size)]
        sample_size: Option<u16>,

        /// Sound volume multiplier
        #[arg(long)]
        volume: Option<f64>,

        /// Ramp sawtooth waves upward instead of downward
        #[arg(long)]
        rising_saw: bool,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// List presets and wave shapes
    List {
        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_sample_size(s: &str) -> Result<u16, String> {
    match s.parse::<u16>() {
        Ok(size @ (8 | 16)) => Ok(size),
        _ => Err(format!("sample size must be 8 or 16, got '{}'", s)),
    }
}
