//! Coefficient calculator: musical parameters to biquad coefficient sets.
//!
//! Two designs are provided:
//!
//! - [`peak_coefficients`] - a resonant bell (RBJ peaking EQ)
//! - [`cut_cascade`] - an even-order Butterworth high-pass or low-pass built
//!   from cascaded second-order sections
//!
//! Both are pure and allocation-free. Inputs are sanitized before design so
//! that every returned section is finite and stable for any input, including
//! NaN, zero Q and cutoffs at or beyond Nyquist.
//!
//! # Butterworth Pole Placement
//!
//! An order-`N` Butterworth response splits into `N/2` conjugate pole pairs.
//! Section `k` (0-based) realizes the pair at angle `θ_k = π(2k+1)/(2N)`
//! from the negative real axis, which is a second-order section with
//!
//! ```text
//! Q_k = 1 / (2 cos θ_k)
//! ```
//!
//! mapped to the z-plane with the pre-warped bilinear transform. For N = 8
//! this gives Q ≈ 0.510, 0.601, 0.900, 2.563.

use core::f64::consts::PI;
use libm::{cos, pow};

use crate::biquad::{
    BiquadCoefficients, highpass_coefficients, lowpass_coefficients, peaking_eq_coefficients,
};
use crate::math::finite_or;

/// Maximum number of second-order sections in a cut cascade.
pub const MAX_CUT_SECTIONS: usize = 4;

/// Highest supported cut filter order (48 dB/octave).
pub const MAX_CUT_ORDER: usize = MAX_CUT_SECTIONS * 2;

/// Design frequencies are clamped to this fraction of the sample rate.
///
/// Just below Nyquist (0.5), where the bilinear transform stays well defined.
pub const MAX_FREQUENCY_RATIO: f64 = 0.49;

/// Lowest design frequency in Hz.
pub const MIN_FREQUENCY_HZ: f64 = 10.0;

/// Design frequencies never fall below this fraction of the sample rate.
///
/// Below it the poles sit so close to `z = 1` that the rounded `f32`
/// coefficients can no longer be guaranteed stable.
pub const MIN_FREQUENCY_RATIO: f64 = 1.0e-4;

/// Lowest sample rate the calculator designs for.
pub const MIN_SAMPLE_RATE: f32 = 1000.0;

/// Highest sample rate the calculator designs for.
pub const MAX_SAMPLE_RATE: f32 = 768_000.0;

/// Q is clamped to `[MIN_Q, MAX_Q]` before design.
pub const MIN_Q: f64 = 0.025;

/// Upper Q bound.
pub const MAX_Q: f64 = 40.0;

/// Peak gain is clamped to `±MAX_GAIN_DB` before design.
pub const MAX_GAIN_DB: f64 = 48.0;

/// Direction of a cut filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CutKind {
    /// Removes content below the cutoff (Butterworth high-pass).
    LowCut,
    /// Removes content above the cutoff (Butterworth low-pass).
    HighCut,
}

/// Fixed-capacity, ordered list of cut filter sections.
///
/// Holds exactly `order / 2` sections for the order it was designed with,
/// in the order they are meant to be applied. Never allocates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutCascade {
    sections: [BiquadCoefficients; MAX_CUT_SECTIONS],
    len: usize,
}

impl CutCascade {
    /// Number of designed sections.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the cascade has no sections.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Section `index`, if it was designed.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&BiquadCoefficients> {
        self.as_slice().get(index)
    }

    /// The designed sections as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[BiquadCoefficients] {
        &self.sections[..self.len]
    }

    /// Iterates over the designed sections in application order.
    pub fn iter(&self) -> impl Iterator<Item = &BiquadCoefficients> {
        self.as_slice().iter()
    }
}

/// Clamps a design frequency into `[lower, MAX_FREQUENCY_RATIO * sample_rate]`,
/// where `lower` is the larger of [`MIN_FREQUENCY_HZ`] and
/// `MIN_FREQUENCY_RATIO * sample_rate`.
///
/// Non-finite input falls back to 1 kHz before clamping.
pub fn clamp_frequency(frequency: f64, sample_rate: f64) -> f64 {
    let lower = MIN_FREQUENCY_HZ.max(sample_rate * MIN_FREQUENCY_RATIO);
    let upper = (sample_rate * MAX_FREQUENCY_RATIO).max(lower);
    finite_or(frequency, 1000.0).clamp(lower, upper)
}

/// Non-finite or non-positive rates fall back to 48 kHz; everything else is
/// clamped into `[MIN_SAMPLE_RATE, MAX_SAMPLE_RATE]`.
fn sanitize_sample_rate(sample_rate: f32) -> f64 {
    let sr = if sample_rate.is_finite() && sample_rate > 0.0 {
        sample_rate.clamp(MIN_SAMPLE_RATE, MAX_SAMPLE_RATE)
    } else {
        48000.0
    };
    f64::from(sr)
}

/// Designs a peak (bell) filter.
///
/// `gain_db` is converted to a linear amplitude factor `10^(dB/20)`. At
/// `gain_db == 0` the result is an exact identity for any frequency and Q.
///
/// # Arguments
///
/// * `sample_rate` - Sample rate in Hz
/// * `frequency` - Center frequency in Hz
/// * `q` - Q factor (> 0)
/// * `gain_db` - Gain at the center frequency in dB
///
/// # Example
///
/// ```rust
/// use cascade_core::peak_coefficients;
///
/// let c = peak_coefficients(48000.0, 1000.0, 1.0, 12.0);
/// let boost = c.magnitude_at(1000.0, 48000.0);
/// assert!((boost - 3.981).abs() < 0.01);
/// ```
pub fn peak_coefficients(sample_rate: f32, frequency: f32, q: f32, gain_db: f32) -> BiquadCoefficients {
    let sr = sanitize_sample_rate(sample_rate);
    let freq = clamp_frequency(f64::from(frequency), sr);
    let q = finite_or(f64::from(q), 1.0).clamp(MIN_Q, MAX_Q);
    let gain_db = finite_or(f64::from(gain_db), 0.0).clamp(-MAX_GAIN_DB, MAX_GAIN_DB);

    let gain_linear = pow(10.0, gain_db / 20.0);
    peaking_eq_coefficients(freq, q, gain_linear, sr)
}

/// Q of section `section` in an order-`order` Butterworth cascade.
pub fn butterworth_q(order: usize, section: usize) -> f64 {
    let theta = PI * (2 * section + 1) as f64 / (2 * order) as f64;
    1.0 / (2.0 * cos(theta))
}

/// Designs an even-order Butterworth cut filter as cascaded biquads.
///
/// `order` is rounded up to the next even number and clamped to
/// `2..=MAX_CUT_ORDER`; the result holds exactly `order / 2` sections. The
/// cutoff is clamped just below Nyquist.
///
/// # Arguments
///
/// * `sample_rate` - Sample rate in Hz
/// * `cutoff` - -3 dB frequency of the combined response in Hz
/// * `order` - Filter order (2, 4, 6 or 8 for 12–48 dB/octave)
/// * `kind` - [`CutKind::LowCut`] (high-pass) or [`CutKind::HighCut`] (low-pass)
///
/// # Example
///
/// ```rust
/// use cascade_core::{CutKind, cut_cascade};
///
/// let cascade = cut_cascade(48000.0, 100.0, 8, CutKind::LowCut);
/// assert_eq!(cascade.len(), 4);
/// assert!(cascade.iter().all(|c| c.is_stable()));
/// ```
pub fn cut_cascade(sample_rate: f32, cutoff: f32, order: usize, kind: CutKind) -> CutCascade {
    let sr = sanitize_sample_rate(sample_rate);
    let freq = clamp_frequency(f64::from(cutoff), sr);
    let order = order.clamp(2, MAX_CUT_ORDER).next_multiple_of(2);
    let len = order / 2;

    let mut sections = [BiquadCoefficients::IDENTITY; MAX_CUT_SECTIONS];
    for (k, section) in sections.iter_mut().take(len).enumerate() {
        let q = butterworth_q(order, k);
        *section = match kind {
            CutKind::LowCut => highpass_coefficients(freq, q, sr),
            CutKind::HighCut => lowpass_coefficients(freq, q, sr),
        };
    }

    CutCascade { sections, len }
}
