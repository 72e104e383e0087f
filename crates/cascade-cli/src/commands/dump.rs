//! Settings dump command.

use super::common::SettingsArgs;
use clap::Args;

#[derive(Args)]
pub struct DumpArgs {
    #[command(flatten)]
    settings: SettingsArgs,
}

pub fn run(args: DumpArgs) -> anyhow::Result<()> {
    let snapshot = args.settings.load()?.snapshot();
    print!("{}", toml::to_string(&snapshot)?);
    Ok(())
}
