//! List command implementation

use std::process::ExitCode;

use anyhow::Result;
use blipgen_spec::WaveShape;
use blipgen_synth::Preset;
use colored::Colorize;
use serde_json::json;

/// One-line description of a preset.
pub fn describe(preset: Preset) -> &'static str {
    match preset {
        Preset::PickupCoin => "bright chime with an optional arpeggio jump",
        Preset::LaserShoot => "fast downward sweep",
        Preset::Explosion => "white-noise burst with falling pitch",
        Preset::PowerUp => "rising sweep, sometimes repeated",
        Preset::HitHurt => "short harsh downward blip",
        Preset::Jump => "square wave sliding upward",
        Preset::BlipSelect => "very short menu blip",
        Preset::Synth => "filtered plucky synth note",
        Preset::Random => "every parameter randomised",
        Preset::Tone => "sustained single pitch (--frequency, --wave)",
    }
}

/// Run the list command
pub fn run(json_output: bool) -> Result<ExitCode> {
    if json_output {
        let presets: Vec<_> = Preset::ALL
            .iter()
            .map(|p| json!({ "name": p.as_str(), "description": describe(*p) }))
            .collect();
        let waves: Vec<_> = WaveShape::ALL.iter().map(|w| w.as_str()).collect();
        let output = json!({ "presets": presets, "wave_shapes": waves });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "Presets:".cyan().bold());
    for preset in Preset::ALL {
        println!("  {:<12} {}", preset.as_str().green(), describe(preset));
    }
    println!("{}", "Wave shapes:".cyan().bold());
    for shape in WaveShape::ALL {
        println!("  {:<15} code {}", shape.as_str().green(), shape.code());
    }
    Ok(ExitCode::SUCCESS)
}
