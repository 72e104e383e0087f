//! Impulse response rendering command.

use super::common::SettingsArgs;
use anyhow::Context;
use cascade_analysis::unit_impulse;
use clap::Args;
use hound::{SampleFormat, WavSpec, WavWriter};
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct ImpulseArgs {
    /// Output WAV file (stereo, 32-bit float)
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    #[command(flatten)]
    settings: SettingsArgs,

    /// Length in samples
    #[arg(long, default_value = "48000")]
    length: usize,
}

pub fn run(args: ImpulseArgs) -> anyhow::Result<()> {
    if args.length == 0 {
        anyhow::bail!("--length must be at least 1");
    }
    let mut eq = args.settings.prepared_eq(args.length)?;

    let mut left = unit_impulse(args.length);
    let mut right = unit_impulse(args.length);
    eq.process_block(&mut left, &mut right);

    // hound wants an integral rate; prepare() has already range-checked it.
    let sample_rate = args.settings.sample_rate.round() as u32;
    write_stereo(&args.output, &left, &right, sample_rate)
        .with_context(|| format!("writing {}", args.output.display()))?;

    tracing::info!(
        path = %args.output.display(),
        samples = args.length,
        sample_rate,
        "wrote impulse response"
    );
    Ok(())
}

fn write_stereo(
    path: &Path,
    left: &[f32],
    right: &[f32],
    sample_rate: u32,
) -> Result<(), hound::Error> {
    let spec = WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(path, spec)?;
    for (l, r) in left.iter().zip(right) {
        writer.write_sample(*l)?;
        writer.write_sample(*r)?;
    }
    writer.finalize()
}
