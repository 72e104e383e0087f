//! Parameter listing command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use super::common::{SettingsArgs, format_value};
use cascade_eq::layout;
use clap::Args;

#[derive(Args)]
pub struct ParamsArgs {
    #[command(flatten)]
    settings: SettingsArgs,

    /// Show only parameters in this group (low_cut, high_cut, peak1..peak4)
    #[arg(long)]
    group: Option<String>,
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    let params = args.settings.load()?;
    let values = params.values();

    println!("Cascade EQ Parameters");
    println!("=====================");
    println!();
    println!(
        "  {:3}  {:14}  {:9}  {:15}  {:12}  {:12}  {}",
        "#", "Name", "Short", "ID", "Value", "Default", "Range"
    );
    println!(
        "  {:3}  {:14}  {:9}  {:15}  {:12}  {:12}  {}",
        "-", "----", "-----", "--", "-----", "-------", "-----"
    );

    let mut shown = 0;
    for (index, desc) in layout::descriptors().iter().enumerate() {
        if let Some(group) = &args.group
            && !desc.group.eq_ignore_ascii_case(group)
        {
            continue;
        }
        shown += 1;

        let range = if desc.choices.is_empty() {
            format!("{} .. {}{}", desc.min, desc.max, desc.unit.suffix())
        } else {
            desc.choices.join(" | ")
        };
        println!(
            "  {:3}  {:14}  {:9}  {:15}  {:12}  {:12}  {}",
            index,
            desc.name,
            desc.short_name,
            desc.string_id,
            format_value(desc, values[index]),
            format_value(desc, desc.default),
            range
        );
    }

    if shown == 0
        && let Some(group) = &args.group
    {
        anyhow::bail!("No parameters in group '{}'", group);
    }

    println!();
    println!("Set values with --param <name>=<value>, e.g. --param \"LC Freq=80\".");
    Ok(())
}
