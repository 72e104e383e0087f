//! Biquad (bi-quadratic) filter structure.
//!
//! Provides normalized second-order coefficients, the running filter that
//! applies them, and the RBJ Audio EQ Cookbook formulas used to design them.
//!
//! Coefficients are designed in `f64` and rounded once to `f32` for the
//! sample path, which keeps low-frequency sections well conditioned.

use core::f64::consts::PI;
use libm::{cos, sin, sqrt};

use crate::math::flush_denormal;

/// Normalized second-order section coefficients (`a0 == 1`).
///
/// Represents the transfer function:
/// ```text
///         b0 + b1*z^-1 + b2*z^-2
/// H(z) = ------------------------
///          1 + a1*z^-1 + a2*z^-2
/// ```
///
/// A value is immutable once computed. Filters swap the whole set at once,
/// never individual fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoefficients {
    /// Feedforward coefficient for `x[n]`.
    pub b0: f32,
    /// Feedforward coefficient for `x[n-1]`.
    pub b1: f32,
    /// Feedforward coefficient for `x[n-2]`.
    pub b2: f32,
    /// Feedback coefficient for `y[n-1]`.
    pub a1: f32,
    /// Feedback coefficient for `y[n-2]`.
    pub a2: f32,
}

impl BiquadCoefficients {
    /// Passthrough coefficients: `y[n] = x[n]`.
    pub const IDENTITY: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    /// Builds coefficients from an unnormalized section, dividing by `a0`.
    ///
    /// # Arguments
    ///
    /// * `b0, b1, b2` - Feedforward coefficients
    /// * `a0, a1, a2` - Feedback coefficients
    pub fn normalized(b0: f64, b1: f64, b2: f64, a0: f64, a1: f64, a2: f64) -> Self {
        Self {
            b0: (b0 / a0) as f32,
            b1: (b1 / a0) as f32,
            b2: (b2 / a0) as f32,
            a1: (a1 / a0) as f32,
            a2: (a2 / a0) as f32,
        }
    }

    /// Returns `true` if every coefficient is finite.
    pub fn is_finite(&self) -> bool {
        self.b0.is_finite()
            && self.b1.is_finite()
            && self.b2.is_finite()
            && self.a1.is_finite()
            && self.a2.is_finite()
    }

    /// Returns `true` if both poles lie strictly inside the unit circle.
    ///
    /// Uses the stability triangle for `z^2 + a1*z + a2`:
    /// `|a2| < 1` and `|a1| < 1 + a2`.
    pub fn is_stable(&self) -> bool {
        let a1 = f64::from(self.a1);
        let a2 = f64::from(self.a2);
        self.is_finite() && a2.abs() < 1.0 && a1.abs() < 1.0 + a2
    }

    /// Largest pole magnitude of the section.
    pub fn max_pole_radius(&self) -> f64 {
        let a1 = f64::from(self.a1);
        let a2 = f64::from(self.a2);
        let disc = a1 * a1 - 4.0 * a2;
        if disc < 0.0 {
            // Complex conjugate pair: |p|^2 = a2
            sqrt(a2)
        } else {
            let root = sqrt(disc);
            let p1 = (-a1 + root) * 0.5;
            let p2 = (-a1 - root) * 0.5;
            p1.abs().max(p2.abs())
        }
    }

    /// Linear magnitude of the frequency response at `frequency` Hz.
    pub fn magnitude_at(&self, frequency: f32, sample_rate: f32) -> f32 {
        let w = 2.0 * PI * f64::from(frequency) / f64::from(sample_rate);
        let (cos1, sin1) = (cos(w), sin(w));
        let (cos2, sin2) = (cos(2.0 * w), sin(2.0 * w));

        let (b0, b1, b2) = (
            f64::from(self.b0),
            f64::from(self.b1),
            f64::from(self.b2),
        );
        let (a1, a2) = (f64::from(self.a1), f64::from(self.a2));

        let num_re = b0 + b1 * cos1 + b2 * cos2;
        let num_im = -(b1 * sin1 + b2 * sin2);
        let den_re = 1.0 + a1 * cos1 + a2 * cos2;
        let den_im = -(a1 * sin1 + a2 * sin2);

        let num = num_re * num_re + num_im * num_im;
        let den = den_re * den_re + den_im * den_im;
        if den <= 0.0 {
            return 0.0;
        }
        sqrt(num / den) as f32
    }
}

impl Default for BiquadCoefficients {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Second-order IIR filter: one coefficient set plus its running state.
///
/// Implements the transposed Direct Form II structure, which needs only two
/// state values per instance:
/// ```text
/// y[n]  = b0*x[n] + s1
/// s1'   = b1*x[n] - a1*y[n] + s2
/// s2'   = b2*x[n] - a2*y[n]
/// ```
#[derive(Debug, Clone)]
pub struct Biquad {
    coefficients: BiquadCoefficients,
    s1: f32,
    s2: f32,
}

impl Biquad {
    /// Creates a new biquad with passthrough coefficients.
    pub fn new() -> Self {
        Self::with_coefficients(BiquadCoefficients::IDENTITY)
    }

    /// Creates a biquad with the given coefficients and cleared state.
    pub fn with_coefficients(coefficients: BiquadCoefficients) -> Self {
        Self {
            coefficients,
            s1: 0.0,
            s2: 0.0,
        }
    }

    /// Replaces the whole coefficient set. State is kept.
    #[inline]
    pub fn set_coefficients(&mut self, coefficients: BiquadCoefficients) {
        self.coefficients = coefficients;
    }

    /// Current coefficients.
    #[inline]
    pub fn coefficients(&self) -> &BiquadCoefficients {
        &self.coefficients
    }

    /// Running state `[s1, s2]`.
    #[inline]
    pub fn state(&self) -> [f32; 2] {
        [self.s1, self.s2]
    }

    /// Processes a single sample through the biquad filter.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let c = &self.coefficients;
        let output = c.b0 * input + self.s1;

        self.s1 = flush_denormal(c.b1 * input - c.a1 * output + self.s2);
        self.s2 = flush_denormal(c.b2 * input - c.a2 * output);

        output
    }

    /// Clears the filter state without changing coefficients.
    pub fn clear(&mut self) {
        self.s1 = 0.0;
        self.s2 = 0.0;
    }
}

impl Default for Biquad {
    fn default() -> Self {
        Self::new()
    }
}

fn omega(frequency: f64, sample_rate: f64) -> (f64, f64) {
    let w0 = 2.0 * PI * frequency / sample_rate;
    (cos(w0), sin(w0))
}

/// Calculates low-pass coefficients using the RBJ cookbook formula.
///
/// # Arguments
///
/// * `frequency` - Cutoff frequency in Hz
/// * `q` - Q factor (0.7071 for a Butterworth second-order response)
/// * `sample_rate` - Sample rate in Hz
pub fn lowpass_coefficients(frequency: f64, q: f64, sample_rate: f64) -> BiquadCoefficients {
    let (cos_w, sin_w) = omega(frequency, sample_rate);
    let alpha = sin_w / (2.0 * q);

    let b0 = (1.0 - cos_w) / 2.0;
    let b1 = 1.0 - cos_w;
    let b2 = (1.0 - cos_w) / 2.0;
    let a0 = 1.0 + alpha;
    let a1 = -2.0 * cos_w;
    let a2 = 1.0 - alpha;

    BiquadCoefficients::normalized(b0, b1, b2, a0, a1, a2)
}

/// Calculates high-pass coefficients using the RBJ cookbook formula.
///
/// # Arguments
///
/// * `frequency` - Cutoff frequency in Hz
/// * `q` - Q factor (0.7071 for a Butterworth second-order response)
/// * `sample_rate` - Sample rate in Hz
pub fn highpass_coefficients(frequency: f64, q: f64, sample_rate: f64) -> BiquadCoefficients {
    let (cos_w, sin_w) = omega(frequency, sample_rate);
    let alpha = sin_w / (2.0 * q);

    let b0 = (1.0 + cos_w) / 2.0;
    let b1 = -(1.0 + cos_w);
    let b2 = (1.0 + cos_w) / 2.0;
    let a0 = 1.0 + alpha;
    let a1 = -2.0 * cos_w;
    let a2 = 1.0 - alpha;

    BiquadCoefficients::normalized(b0, b1, b2, a0, a1, a2)
}

/// Calculates peaking EQ coefficients using the RBJ cookbook formula.
///
/// A peaking EQ boosts or cuts around a center frequency with a bandwidth set
/// by `q`. The response is `gain_linear` at the center and unity at DC and
/// Nyquist.
///
/// # Arguments
///
/// * `frequency` - Center frequency in Hz
/// * `q` - Q factor (bandwidth = frequency / Q)
/// * `gain_linear` - Linear amplitude factor at the center (`10^(dB/20)`)
/// * `sample_rate` - Sample rate in Hz
pub fn peaking_eq_coefficients(
    frequency: f64,
    q: f64,
    gain_linear: f64,
    sample_rate: f64,
) -> BiquadCoefficients {
    let a = sqrt(gain_linear);
    let (cos_w, sin_w) = omega(frequency, sample_rate);
    let alpha = sin_w / (2.0 * q);

    let b0 = 1.0 + alpha * a;
    let b1 = -2.0 * cos_w;
    let b2 = 1.0 - alpha * a;
    let a0 = 1.0 + alpha / a;
    let a1 = -2.0 * cos_w;
    let a2 = 1.0 - alpha / a;

    BiquadCoefficients::normalized(b0, b1, b2, a0, a1, a2)
}
