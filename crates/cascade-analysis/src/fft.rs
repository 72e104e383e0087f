//! FFT wrapper with windowing functions

use rustfft::{FftPlanner, num_complex::Complex};
use std::f32::consts::PI;
use std::sync::Arc;

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Window {
    /// Rectangular (no windowing)
    #[default]
    Rectangular,
    /// Hann window (raised cosine)
    Hann,
    /// Hamming window
    Hamming,
    /// Blackman window
    Blackman,
}

impl Window {
    /// Window weight at position `i` of a periodic window of length `n`.
    fn weight(self, i: usize, n: usize) -> f32 {
        let x = 2.0 * PI * i as f32 / n as f32;
        match self {
            Window::Rectangular => 1.0,
            Window::Hann => 0.5 * (1.0 - x.cos()),
            Window::Hamming => 0.54 - 0.46 * x.cos(),
            Window::Blackman => 0.42 - 0.5 * x.cos() + 0.08 * (2.0 * x).cos(),
        }
    }

    /// Apply window to a buffer
    pub fn apply(&self, buffer: &mut [f32]) {
        let n = buffer.len();
        for (i, sample) in buffer.iter_mut().enumerate() {
            *sample *= self.weight(i, n);
        }
    }

    /// Taper the last `fade_len` samples with the falling half of the window.
    ///
    /// Used on impulse responses, where the onset must stay untouched and
    /// only a truncated tail needs smoothing. `fade_len` is capped at the
    /// buffer length.
    pub fn apply_fade_out(&self, buffer: &mut [f32], fade_len: usize) {
        let fade_len = fade_len.min(buffer.len());
        if fade_len == 0 {
            return;
        }
        let start = buffer.len() - fade_len;
        for (i, sample) in buffer[start..].iter_mut().enumerate() {
            *sample *= self.weight(fade_len + i, 2 * fade_len);
        }
    }

    /// Get window coefficients
    pub fn coefficients(&self, size: usize) -> Vec<f32> {
        let mut coeffs = vec![1.0; size];
        self.apply(&mut coeffs);
        coeffs
    }

    /// Lowercase name, as accepted by [`Window::from_name`].
    pub fn name(&self) -> &'static str {
        match self {
            Window::Rectangular => "rectangular",
            Window::Hann => "hann",
            Window::Hamming => "hamming",
            Window::Blackman => "blackman",
        }
    }

    /// Look up a window by name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        [
            Window::Rectangular,
            Window::Hann,
            Window::Hamming,
            Window::Blackman,
        ]
        .into_iter()
        .find(|w| w.name().eq_ignore_ascii_case(name))
    }
}

/// Forward FFT of real signals at a fixed size
pub struct Fft {
    fft: Arc<dyn rustfft::Fft<f32>>,
    size: usize,
}

impl Fft {
    /// Create a new FFT processor for the given size
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        Self { fft, size }
    }

    /// Get FFT size
    pub fn size(&self) -> usize {
        self.size
    }

    /// Perform forward FFT on real input
    ///
    /// Input shorter than the FFT size is zero-padded, longer input is
    /// truncated. Returns complex spectrum (size/2 + 1 bins for positive
    /// frequencies)
    pub fn forward(&self, input: &[f32]) -> Vec<Complex<f32>> {
        let mut buffer: Vec<Complex<f32>> = input
            .iter()
            .take(self.size)
            .map(|&x| Complex::new(x, 0.0))
            .collect();
        buffer.resize(self.size, Complex::new(0.0, 0.0));

        self.fft.process(&mut buffer);

        // DC to Nyquist
        buffer.truncate(self.size / 2 + 1);
        buffer
    }
}

/// Compute magnitude spectrum in dB
pub fn magnitude_db(spectrum: &[Complex<f32>]) -> Vec<f32> {
    spectrum
        .iter()
        .map(|c| 20.0 * c.norm().max(1e-10).log10())
        .collect()
}
