//! Cascade CLI - inspect and render the cascade-eq multiband equalizer.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cascade")]
#[command(author, version, about = "Cascade multiband EQ CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the parameter layout and the resolved values
    Params(commands::params::ParamsArgs),

    /// Print the frequency response of a setting
    Response(commands::response::ResponseArgs),

    /// Render the stereo impulse response of a setting to a WAV file
    Impulse(commands::impulse::ImpulseArgs),

    /// Print the resolved settings as TOML
    Dump(commands::dump::DumpArgs),
}

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr so table and TOML output stay pipeable.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Params(args) => commands::params::run(args),
        Commands::Response(args) => commands::response::run(args),
        Commands::Impulse(args) => commands::impulse::run(args),
        Commands::Dump(args) => commands::dump::run(args),
    }
}
