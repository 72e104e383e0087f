//! A single filter slot: one biquad, a bypass flag and a kind tag.

use crate::biquad::{Biquad, BiquadCoefficients};
use crate::effect::Effect;

/// Role of a stage within a [`FilterChain`](crate::FilterChain).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    /// One section of a low-cut or high-cut Butterworth cascade.
    Cut,
    /// An independent peak (bell) band.
    Peak,
}

/// One second-order filter unit with its own coefficients and running state.
///
/// When bypassed, [`process_sample`](Self::process_sample) returns its input
/// unchanged and does not advance the state, so the history the stage had
/// when it was bypassed is what it resumes with.
///
/// # Example
///
/// ```rust
/// use cascade_core::{FilterStage, StageKind};
///
/// let mut stage = FilterStage::new(StageKind::Cut);
/// stage.set_bypassed(true);
/// assert_eq!(stage.process_sample(0.3), 0.3);
/// ```
#[derive(Debug, Clone)]
pub struct FilterStage {
    kind: StageKind,
    biquad: Biquad,
    bypassed: bool,
}

impl FilterStage {
    /// Creates an active stage with identity coefficients.
    pub fn new(kind: StageKind) -> Self {
        Self {
            kind,
            biquad: Biquad::new(),
            bypassed: false,
        }
    }

    /// Kind tag assigned at construction.
    #[inline]
    pub fn kind(&self) -> StageKind {
        self.kind
    }

    /// Current coefficients.
    #[inline]
    pub fn coefficients(&self) -> &BiquadCoefficients {
        self.biquad.coefficients()
    }

    /// Swaps in a whole new coefficient set. Running state is kept.
    #[inline]
    pub fn set_coefficients(&mut self, coefficients: BiquadCoefficients) {
        self.biquad.set_coefficients(coefficients);
    }

    /// Whether the stage is currently bypassed.
    #[inline]
    pub fn is_bypassed(&self) -> bool {
        self.bypassed
    }

    /// Enables or bypasses the stage.
    #[inline]
    pub fn set_bypassed(&mut self, bypassed: bool) {
        self.bypassed = bypassed;
    }

    /// Running state `[s1, s2]` of the underlying biquad.
    #[inline]
    pub fn state(&self) -> [f32; 2] {
        self.biquad.state()
    }

    /// Filters one sample, or passes it through untouched when bypassed.
    #[inline]
    pub fn process_sample(&mut self, input: f32) -> f32 {
        if self.bypassed {
            input
        } else {
            self.biquad.process(input)
        }
    }

    /// Linear magnitude at `frequency`; 1.0 when bypassed.
    pub fn magnitude_at(&self, frequency: f32, sample_rate: f32) -> f32 {
        if self.bypassed {
            1.0
        } else {
            self.coefficients().magnitude_at(frequency, sample_rate)
        }
    }
}

impl Effect for FilterStage {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        self.process_sample(input)
    }

    fn reset(&mut self) {
        self.biquad.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biquad::lowpass_coefficients;

    #[test]
    fn bypassed_stage_is_transparent_and_keeps_state() {
        let mut stage = FilterStage::new(StageKind::Cut);
        stage.set_coefficients(lowpass_coefficients(500.0, 0.707, 48000.0));

        for i in 0..32 {
            stage.process_sample((i as f32 * 0.3).sin());
        }
        let before = stage.state();

        stage.set_bypassed(true);
        for &x in &[1.0, -0.5, 0.25, 1e-3, -1.0] {
            assert_eq!(stage.process_sample(x), x);
        }
        assert_eq!(stage.state(), before);
    }

    #[test]
    fn coefficient_swap_keeps_state() {
        let mut stage = FilterStage::new(StageKind::Peak);
        stage.set_coefficients(lowpass_coefficients(500.0, 0.707, 48000.0));
        stage.process_sample(1.0);
        let before = stage.state();

        stage.set_coefficients(lowpass_coefficients(800.0, 0.707, 48000.0));
        assert_eq!(stage.state(), before);
        assert_eq!(
            *stage.coefficients(),
            lowpass_coefficients(800.0, 0.707, 48000.0)
        );
    }

    #[test]
    fn reset_clears_state() {
        let mut stage = FilterStage::new(StageKind::Cut);
        stage.set_coefficients(lowpass_coefficients(500.0, 0.707, 48000.0));
        stage.process(1.0);
        stage.reset();
        assert_eq!(stage.state(), [0.0, 0.0]);
    }

    #[test]
    fn bypassed_magnitude_is_unity() {
        let mut stage = FilterStage::new(StageKind::Cut);
        stage.set_coefficients(lowpass_coefficients(500.0, 0.707, 48000.0));
        stage.set_bypassed(true);
        assert_eq!(stage.magnitude_at(10000.0, 48000.0), 1.0);
        assert_eq!(stage.kind(), StageKind::Cut);
    }
}
