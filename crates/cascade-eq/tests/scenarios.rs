//! End-to-end scenarios for the stereo EQ.
//!
//! Drives `StereoEq` the way a host does (shared parameters, `prepare`,
//! block-wise `process`) and checks signal-level results.

use std::sync::Arc;

use cascade_eq::{ParamSnapshot, SharedParams, Slope, StereoEq, layout};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK: usize = 512;
const TAU: f64 = core::f64::consts::TAU;

fn sine(freq_hz: f32, len: usize) -> Vec<f32> {
    (0..len)
        .map(|n| libm::sinf(core::f32::consts::TAU * freq_hz * n as f32 / SAMPLE_RATE))
        .collect()
}

fn rms(signal: &[f32]) -> f32 {
    let sum_sq: f32 = signal.iter().map(|&s| s * s).sum();
    libm::sqrtf(sum_sq / signal.len() as f32)
}

fn peak(signal: &[f32]) -> f32 {
    signal.iter().fold(0.0f32, |m, &s| m.max(s.abs()))
}

fn prepared() -> (Arc<SharedParams>, StereoEq) {
    let params = Arc::new(SharedParams::new());
    let mut eq = StereoEq::new(Arc::clone(&params));
    eq.prepare(SAMPLE_RATE, BLOCK).expect("valid setup");
    (params, eq)
}

/// Processes `input` on both channels in `BLOCK`-sized chunks.
fn run(eq: &mut StereoEq, input: &[f32]) -> (Vec<f32>, Vec<f32>) {
    let mut left = input.to_vec();
    let mut right = input.to_vec();
    for (l, r) in left.chunks_mut(BLOCK).zip(right.chunks_mut(BLOCK)) {
        let n = l.len();
        eq.process(l, r, n);
    }
    (left, right)
}

/// Magnitude in dB of the DFT of `signal` at `freq_hz`.
fn dft_db(signal: &[f32], freq_hz: f64) -> f64 {
    let w = TAU * freq_hz / f64::from(SAMPLE_RATE);
    let (mut re, mut im) = (0.0f64, 0.0f64);
    for (n, &x) in signal.iter().enumerate() {
        let phase = w * n as f64;
        re += f64::from(x) * phase.cos();
        im -= f64::from(x) * phase.sin();
    }
    20.0 * (re.hypot(im)).max(1e-300).log10()
}

#[test]
fn low_cut_leaves_1khz_untouched() {
    let (params, mut eq) = prepared();
    params.set(layout::LOW_CUT_FREQ, 100.0);
    params.set(layout::LOW_CUT_SLOPE, Slope::Db24.index() as f32);

    let input = sine(1000.0, BLOCK * 8);
    let (left, right) = run(&mut eq, &input);

    let settled = BLOCK * 4..;
    let ratio = rms(&left[settled.clone()]) / rms(&input[settled.clone()]);
    assert!((ratio - 1.0).abs() < 0.01, "RMS ratio {ratio}");
    assert_eq!(left, right);
}

#[test]
fn first_block_after_prepare_passes_1khz() {
    let (params, mut eq) = prepared();
    params.set(layout::LOW_CUT_FREQ, 100.0);
    params.set(layout::LOW_CUT_SLOPE, 1.0);

    let input = sine(1000.0, BLOCK);
    let mut left = input.clone();
    let mut right = input.clone();
    eq.process(&mut left, &mut right, BLOCK);

    // Skip the onset transient of the 4th-order high-pass.
    let ratio = rms(&left[BLOCK / 2..]) / rms(&input[BLOCK / 2..]);
    assert!((ratio - 1.0).abs() < 0.05, "RMS ratio {ratio}");
}

#[test]
fn peak_boost_amplifies_center_by_gain() {
    let (params, mut eq) = prepared();
    params.set(layout::peak_freq(0), 1000.0);
    params.set(layout::peak_gain(0), 12.0);
    params.set(layout::peak_quality(0), 1.0);

    let input = sine(1000.0, BLOCK * 16);
    let (left, _) = run(&mut eq, &input);

    let expected = libm::powf(10.0, 12.0 / 20.0);
    let gain = peak(&left[BLOCK * 8..]) / peak(&input[BLOCK * 8..]);
    assert!((gain - expected).abs() < 0.05, "expected {expected}, got {gain}");
}

#[test]
fn steepest_cuts_roll_off_like_8th_order_butterworth() {
    let (params, mut eq) = prepared();
    params.set(layout::LOW_CUT_FREQ, 1000.0);
    params.set(layout::LOW_CUT_SLOPE, Slope::Db48.index() as f32);
    params.set(layout::HIGH_CUT_SLOPE, Slope::Db48.index() as f32);
    eq.update_filters();

    let mut impulse = vec![0.0f32; 32768];
    impulse[0] = 1.0;
    let mut right = impulse.clone();
    eq.process_block(&mut impulse, &mut right);

    let slope = dft_db(&impulse, 1000.0 / 1.5) - dft_db(&impulse, 1000.0 / 3.0);
    assert!((slope - 48.0).abs() < 3.0, "low-cut roll-off {slope:.1} dB/oct");

    let (params, mut eq) = prepared();
    params.set(layout::HIGH_CUT_FREQ, 1500.0);
    params.set(layout::HIGH_CUT_SLOPE, Slope::Db48.index() as f32);
    params.set(layout::LOW_CUT_SLOPE, Slope::Db48.index() as f32);
    eq.update_filters();

    let mut impulse = vec![0.0f32; 32768];
    impulse[0] = 1.0;
    let mut right = impulse.clone();
    eq.process_block(&mut impulse, &mut right);

    let slope = dft_db(&impulse, 2250.0) - dft_db(&impulse, 4500.0);
    assert!((slope - 48.0).abs() < 4.0, "high-cut roll-off {slope:.1} dB/oct");
}

#[test]
fn impulse_response_matches_analytic_curve() {
    let (params, mut eq) = prepared();
    params.set(layout::LOW_CUT_FREQ, 150.0);
    params.set(layout::LOW_CUT_SLOPE, 2.0);
    params.set(layout::HIGH_CUT_FREQ, 9000.0);
    params.set(layout::peak_freq(2), 2500.0);
    params.set(layout::peak_gain(2), -9.0);
    params.set(layout::peak_quality(2), 3.0);
    eq.update_filters();

    let mut impulse = vec![0.0f32; 32768];
    impulse[0] = 1.0;
    let mut right = impulse.clone();
    eq.process_block(&mut impulse, &mut right);

    for &freq in &[300.0f32, 1000.0, 2500.0, 6000.0] {
        let measured = dft_db(&impulse, f64::from(freq));
        let analytic = f64::from(eq.magnitude_db_at(freq).expect("prepared"));
        assert!(
            (measured - analytic).abs() < 0.1,
            "{freq} Hz: measured {measured:.2} dB, analytic {analytic:.2} dB"
        );
    }
}

#[test]
fn parameter_changes_apply_on_next_block() {
    let (params, mut eq) = prepared();
    let input = sine(1000.0, BLOCK * 8);
    let (before, _) = run(&mut eq, &input);

    params.set(layout::HIGH_CUT_FREQ, 200.0);
    params.set(layout::HIGH_CUT_SLOPE, 3.0);
    let (after, _) = run(&mut eq, &input);

    assert!(rms(&before[BLOCK * 6..]) > 0.69);
    assert!(rms(&after[BLOCK * 6..]) < 0.001, "1 kHz should be ~-110 dB");
}

#[test]
fn snapshot_from_settings_drives_processor() {
    let mut snapshot = ParamSnapshot::default();
    snapshot.peaks[3].frequency = 5000.0;
    snapshot.peaks[3].gain_db = 6.0;

    let params = Arc::new(SharedParams::from_snapshot(&snapshot));
    let mut eq = StereoEq::new(params);
    eq.prepare(44100.0, 128).expect("valid setup");

    let db = eq.magnitude_db_at(5000.0).expect("prepared");
    assert!((db - 6.0).abs() < 0.1, "got {db}");
}

#[test]
fn reset_clears_history_without_touching_settings() {
    let (params, mut eq) = prepared();
    params.set(layout::peak_gain(1), 9.0);
    let _ = run(&mut eq, &sine(440.0, BLOCK));
    let coefficients = eq.left_chain().expect("prepared").coefficients();

    eq.reset();
    let left = eq.left_chain().expect("prepared");
    assert!(left.stages().iter().all(|s| s.state() == [0.0; 2]));
    assert_eq!(left.coefficients(), coefficients);
}
