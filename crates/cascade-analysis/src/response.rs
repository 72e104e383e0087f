//! Impulse-response capture and measured magnitude response
//!
//! A linear filter is fully described by its impulse response; the FFT of a
//! long enough response gives the magnitude curve directly. This is the
//! measured counterpart of the analytic `magnitude_at` evaluation in
//! `cascade-core`, and the two should agree to within FFT resolution.

use cascade_core::Effect;

use crate::fft::{Fft, Window, magnitude_db};

/// A unit impulse of `len` samples (`1.0` followed by zeros).
pub fn unit_impulse(len: usize) -> Vec<f32> {
    let mut buffer = vec![0.0; len];
    if let Some(first) = buffer.first_mut() {
        *first = 1.0;
    }
    buffer
}

/// Clears `effect`, feeds it a unit impulse and returns `len` output samples.
pub fn capture_impulse_response<E: Effect + ?Sized>(effect: &mut E, len: usize) -> Vec<f32> {
    effect.reset();
    let mut buffer = unit_impulse(len);
    effect.process_block_inplace(&mut buffer);
    buffer
}

/// `count` frequencies spaced evenly on a log axis from `start` to `end`.
///
/// Returns an empty grid when either bound is not a positive finite number.
///
/// # Example
///
/// ```rust
/// use cascade_analysis::log_spaced_frequencies;
///
/// let grid = log_spaced_frequencies(20.0, 20000.0, 4);
/// assert_eq!(grid.len(), 4);
/// assert!((grid[1] - 200.0).abs() < 0.01);
/// ```
pub fn log_spaced_frequencies(start: f32, end: f32, count: usize) -> Vec<f32> {
    let valid = |f: f32| f.is_finite() && f > 0.0;
    if !valid(start) || !valid(end) {
        return Vec::new();
    }
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let ratio = f64::from(end) / f64::from(start);
            let steps = (count - 1) as f64;
            (0..count)
                .map(|i| (f64::from(start) * ratio.powf(i as f64 / steps)) as f32)
                .collect()
        }
    }
}

/// Magnitude response measured from an impulse response
#[derive(Debug, Clone)]
pub struct FrequencyResponse {
    /// Bin center frequencies (Hz), DC to Nyquist
    pub frequencies: Vec<f32>,
    /// Magnitude per bin (dB)
    pub magnitude_db: Vec<f32>,
    sample_rate: f32,
}

impl FrequencyResponse {
    /// Transforms `impulse_response` at the next power-of-two FFT size.
    pub fn from_impulse(impulse_response: &[f32], sample_rate: f32) -> Self {
        let fft_size = impulse_response.len().max(2).next_power_of_two();
        let fft = Fft::new(fft_size);
        let spectrum = fft.forward(impulse_response);

        let resolution = sample_rate / fft_size as f32;
        let frequencies = (0..spectrum.len())
            .map(|i| i as f32 * resolution)
            .collect();

        Self {
            frequencies,
            magnitude_db: magnitude_db(&spectrum),
            sample_rate,
        }
    }

    /// Like [`FrequencyResponse::from_impulse`], tapering the last
    /// `fade_len` samples with `window` first.
    ///
    /// Use when the response was cut off before it decayed, which would
    /// otherwise show up as ripple in the spectrum.
    pub fn from_impulse_windowed(
        impulse_response: &[f32],
        sample_rate: f32,
        window: Window,
        fade_len: usize,
    ) -> Self {
        let mut tapered = impulse_response.to_vec();
        window.apply_fade_out(&mut tapered, fade_len);
        Self::from_impulse(&tapered, sample_rate)
    }

    /// Sample rate the response was measured at.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Bin spacing in Hz.
    pub fn resolution_hz(&self) -> f32 {
        match self.frequencies.get(1) {
            Some(&f) => f,
            None => self.sample_rate,
        }
    }

    /// Magnitude at `freq_hz`, linearly interpolated between bins.
    pub fn magnitude_db_at(&self, freq_hz: f32) -> f32 {
        interpolate(&self.frequencies, &self.magnitude_db, freq_hz)
    }

    /// Change in level from `freq_hz` to one octave above it, in dB.
    ///
    /// Positive on a rising (high-pass) skirt, negative on a falling one.
    pub fn slope_db_per_octave(&self, freq_hz: f32) -> f32 {
        self.magnitude_db_at(2.0 * freq_hz) - self.magnitude_db_at(freq_hz)
    }

    /// Find -3dB cutoff frequency of a falling skirt (high cut)
    pub fn cutoff_frequency(&self, reference_db: f32) -> Option<f32> {
        self.crossing(reference_db - 3.0, |before, after| before >= 0.0 && after < 0.0)
    }

    /// Find -3dB cutoff frequency of a rising skirt (low cut)
    pub fn low_cutoff_frequency(&self, reference_db: f32) -> Option<f32> {
        self.crossing(reference_db - 3.0, |before, after| before < 0.0 && after >= 0.0)
    }

    /// First bin pair where `is_edge` holds for the levels relative to
    /// `target`, interpolated to a frequency.
    fn crossing(&self, target: f32, is_edge: impl Fn(f32, f32) -> bool) -> Option<f32> {
        let m = &self.magnitude_db;
        let f = &self.frequencies;

        (1..m.len()).find_map(|i| {
            let a = m[i - 1] - target;
            let b = m[i] - target;
            is_edge(a, b).then(|| f[i - 1] + a / (a - b) * (f[i] - f[i - 1]))
        })
    }

    /// Bin with the highest level, as `(frequency, dB)`.
    pub fn peak(&self) -> Option<(f32, f32)> {
        self.frequencies
            .iter()
            .copied()
            .zip(self.magnitude_db.iter().copied())
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }
}

/// Linear interpolation of `y` over sorted `x`, clamped at both ends.
fn interpolate(x: &[f32], y: &[f32], target_x: f32) -> f32 {
    let (Some(&first), Some(&last)) = (y.first(), y.last()) else {
        return 0.0;
    };

    let i = x.partition_point(|&v| v < target_x);
    if i == 0 {
        return first;
    }
    if i >= x.len() {
        return last;
    }

    let t = (target_x - x[i - 1]) / (x[i] - x[i - 1]);
    y[i - 1] + t * (y[i] - y[i - 1])
}
