//! Parameter listing command.

#![allow(clippy::print_literal)]

use clap::Args;
use genloss_core::ParamDescriptor;
use genloss_effects::DESCRIPTORS;

#[derive(Args)]
pub struct ParamsArgs {
    /// Show only parameters in this group (modulation, dropout, tone, noise, output)
    #[arg(long)]
    group: Option<String>,
}

fn format_value(desc: &ParamDescriptor, value: f32) -> String {
    if desc.is_toggle() {
        return if value >= 0.5 { "on" } else { "off" }.to_string();
    }
    format!("{}{}", value, desc.unit.suffix())
}

fn format_range(desc: &ParamDescriptor) -> String {
    if desc.is_toggle() {
        "off/on".to_string()
    } else {
        format!("{} to {}{}", desc.min, desc.max, desc.unit.suffix())
    }
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    let selected: Vec<&ParamDescriptor> = DESCRIPTORS
        .iter()
        .filter(|desc| {
            args.group
                .as_deref()
                .is_none_or(|group| desc.group.eq_ignore_ascii_case(group))
        })
        .collect();

    if selected.is_empty() {
        anyhow::bail!(
            "no parameters in group '{}'",
            args.group.as_deref().unwrap_or_default()
        );
    }

    println!(
        "  {:14}  {:14}  {:10}  {:12}  {}",
        "Key", "Name", "Group", "Default", "Range"
    );
    println!(
        "  {:14}  {:14}  {:10}  {:12}  {}",
        "---", "----", "-----", "-------", "-----"
    );
    for desc in selected {
        println!(
            "  {:14}  {:14}  {:10}  {:12}  {}",
            desc.string_id,
            desc.name,
            desc.group,
            format_value(desc, desc.default),
            format_range(desc)
        );
    }

    println!();
    println!("Example usage:");
    println!("  genloss process input.wav output.wav --param wow_depth=0.5 --param noise=-48dB");

    Ok(())
}
