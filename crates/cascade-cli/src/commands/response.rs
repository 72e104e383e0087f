//! Frequency response command.

use super::common::SettingsArgs;
use cascade_analysis::{FrequencyResponse, Window, log_spaced_frequencies, unit_impulse};
use clap::{Args, ValueEnum};

/// How the response is obtained
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum ResponseMethod {
    /// Evaluate the loaded coefficients directly
    #[default]
    Analytic,
    /// Run an impulse through the processor and take its FFT
    Measured,
}

#[derive(Args)]
pub struct ResponseArgs {
    #[command(flatten)]
    settings: SettingsArgs,

    /// Response source
    #[arg(long, value_enum, default_value_t = ResponseMethod::Analytic)]
    method: ResponseMethod,

    /// Number of log-spaced frequencies to print
    #[arg(long, default_value = "31")]
    points: usize,

    /// Lowest frequency in Hz
    #[arg(long, default_value = "20.0")]
    start: f32,

    /// Highest frequency in Hz
    #[arg(long, default_value = "20000.0")]
    end: f32,

    /// Impulse response length in samples (measured only)
    #[arg(long, default_value = "65536")]
    length: usize,

    /// Window for the impulse tail (measured only)
    #[arg(long, default_value = "rectangular", value_parser = parse_window)]
    window: Window,

    /// Tail fade length in samples (measured only)
    #[arg(long, default_value = "0")]
    fade: usize,
}

fn parse_window(s: &str) -> Result<Window, String> {
    Window::from_name(s)
        .ok_or_else(|| format!("Unknown window '{}' (rectangular, hann, hamming, blackman)", s))
}

pub fn run(args: ResponseArgs) -> anyhow::Result<()> {
    if args.length == 0 {
        anyhow::bail!("--length must be at least 1");
    }
    let sample_rate = args.settings.sample_rate;
    let mut eq = args.settings.prepared_eq(args.length)?;

    let frequencies: Vec<f32> = log_spaced_frequencies(args.start, args.end, args.points)
        .into_iter()
        .filter(|&f| f < sample_rate / 2.0)
        .collect();
    if frequencies.is_empty() {
        anyhow::bail!(
            "No frequencies between {} and {} Hz below Nyquist",
            args.start,
            args.end
        );
    }

    let (levels, measured) = match args.method {
        ResponseMethod::Analytic => {
            let levels = frequencies
                .iter()
                .map(|&f| eq.magnitude_db_at(f).unwrap_or(f32::NEG_INFINITY))
                .collect::<Vec<_>>();
            (levels, None)
        }
        ResponseMethod::Measured => {
            let mut left = unit_impulse(args.length);
            let mut right = unit_impulse(args.length);
            eq.process_block(&mut left, &mut right);
            tracing::info!(samples = args.length, "captured impulse response");

            let response =
                FrequencyResponse::from_impulse_windowed(&left, sample_rate, args.window, args.fade);
            let levels = frequencies
                .iter()
                .map(|&f| response.magnitude_db_at(f))
                .collect::<Vec<_>>();
            (levels, Some(response))
        }
    };

    println!("{:>10}  {:>9}", "Freq (Hz)", "Level (dB)");
    println!("{:>10}  {:>9}", "---------", "----------");
    for (freq, level) in frequencies.iter().zip(&levels) {
        println!("{:>10.1}  {:>9.2}  {}", freq, level, bar(*level));
    }

    if let Some(response) = measured {
        println!();
        println!("Resolution: {:.2} Hz", response.resolution_hz());
        if let Some(low) = response.low_cutoff_frequency(0.0) {
            println!("Low cut -3 dB:  {:.1} Hz", low);
        }
        if let Some(high) = response.cutoff_frequency(0.0) {
            println!("High cut -3 dB: {:.1} Hz", high);
        }
    }

    Ok(())
}

/// Horizontal bar for a level in dB; one character per 3 dB from -48 dB.
fn bar(level_db: f32) -> String {
    let width = ((level_db.clamp(-48.0, 24.0) + 48.0) / 3.0).round() as usize;
    "#".repeat(width)
}
