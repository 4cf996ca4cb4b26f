//! blipgen CLI - command-line interface for procedural sound effects
//!
//! This binary builds, mutates and renders sfxr-style presets.

mod cli_args;

use std::process::ExitCode;

use anyhow::Result;
use blipgen_cli::commands;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli_args::{Cli, Commands};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn dispatch(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Preset {
            kind,
            sound,
            name,
            output,
        } => commands::preset::run(
            kind,
            sound.seed,
            sound.wave,
            sound.frequency,
            sound.mutations,
            name.as_deref(),
            output.as_deref(),
        ),
        Commands::Mutate {
            input,
            seed,
            count,
            output,
        } => commands::mutate::run(&input, seed, count, output.as_deref()),
        Commands::Render {
            kind,
            input,
            sound,
            max_iterations,
            sample_rate,
            sample_size,
            volume,
            rising_saw,
            json,
        } => {
            let record = match (input, kind) {
                (Some(path), _) => commands::read_record(&path)?,
                (None, Some(kind)) => commands::preset::build_record(
                    kind,
                    sound.seed,
                    sound.wave,
                    sound.frequency,
                    sound.mutations,
                    None,
                ),
                (None, None) => anyhow::bail!("render needs a preset kind or --input"),
            };
            let overrides = commands::render::FormatOverrides {
                sample_rate,
                sample_size,
                volume,
            };
            let config = commands::render::generator_config(max_iterations, rising_saw);
            commands::render::run(&record, sound.seed, config, &overrides, json)
        }
        Commands::List { json } => commands::list::run(json),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match dispatch(cli.command) {
        Ok(code) => code,
        Err(e) => {
            let label = colored::Colorize::red("error");
            match commands::error_code(&e) {
                Some(code) => eprintln!("{}[{}]: {:#}", label, code, e),
                None => eprintln!("{}: {:#}", label, e),
            }
            ExitCode::from(1)
        }
    }
}
