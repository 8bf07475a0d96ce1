//! Preset commands: list, show and export.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use genloss_config::{Preset, factory_presets, load_preset};
use genloss_effects::DESCRIPTORS;

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List factory presets
    List,

    /// Show every parameter value of a preset
    Show {
        /// Factory preset name or preset file
        name: String,
    },

    /// Write a preset to a TOML file for editing
    Export {
        /// Factory preset name or preset file
        name: String,

        /// Destination file
        output: PathBuf,

        /// Overwrite if the file exists
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List => list_presets(),
        PresetsCommand::Show { name } => show_preset(&name),
        PresetsCommand::Export {
            name,
            output,
            force,
        } => export_preset(&name, &output, force),
    }
}

fn list_presets() -> anyhow::Result<()> {
    println!("Factory Presets:");
    println!("================");
    for preset in factory_presets() {
        let desc = preset.description.as_deref().unwrap_or("");
        println!("  {:16} - {}", preset.name, desc);
    }
    Ok(())
}

fn show_preset(name: &str) -> anyhow::Result<()> {
    let preset = load_preset(name)?;
    let params = preset.to_params()?;
    // Full snapshot so keys the preset leaves out show their defaults
    let full = Preset::from_params(&preset.name, &params);

    println!("{}", preset.name);
    println!("{}", "=".repeat(preset.name.len()));
    if let Some(desc) = &preset.description {
        println!("{desc}");
    }
    println!();

    for desc in &DESCRIPTORS {
        let value = full.get(desc.string_id).unwrap_or(desc.default);
        let marker = if preset.get(desc.string_id).is_some() { "*" } else { " " };
        println!(
            "  {marker} {:14} {}{}",
            desc.string_id,
            value,
            desc.unit.suffix()
        );
    }
    println!();
    println!("  * set by the preset");
    Ok(())
}

fn export_preset(name: &str, output: &Path, force: bool) -> anyhow::Result<()> {
    if output.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            output.display()
        );
    }

    let preset = load_preset(name)?;
    let params = preset.to_params()?;
    let mut full = Preset::from_params(&preset.name, &params);
    full.description = preset.description.clone();
    full.save(output)?;

    tracing::info!(preset = %preset.name, path = %output.display(), "exported preset");
    Ok(())
}
