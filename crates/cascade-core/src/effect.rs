//! Core processing trait shared by filter stages and chains.
//!
//! ## Design Decisions
//!
//! - **Mono processing**: single `f32` in, single `f32` out. Stereo is built
//!   from two independent instances so channels never share state.
//!
//! - **Object-safe**: `dyn Effect` works, although the filter path uses
//!   static dispatch throughout.
//!
//! - **No allocations**: every method is callable from a real-time thread.

/// Core trait for anything that filters a sample stream.
///
/// # Example
///
/// ```rust
/// use cascade_core::Effect;
///
/// struct Gain {
///     gain: f32,
/// }
///
/// impl Effect for Gain {
///     fn process(&mut self, input: f32) -> f32 {
///         input * self.gain
///     }
///
///     fn reset(&mut self) {}
/// }
///
/// let mut g = Gain { gain: 0.5 };
/// let mut buf = [1.0, 2.0];
/// g.process_block_inplace(&mut buf);
/// assert_eq!(buf, [0.5, 1.0]);
/// ```
pub trait Effect {
    /// Process a single sample, advancing internal state by one step.
    fn process(&mut self, input: f32) -> f32;

    /// Process a block of samples.
    ///
    /// # Panics
    /// Default implementation panics in debug builds if
    /// `input.len() != output.len()`.
    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(
            input.len(),
            output.len(),
            "Input and output buffers must have same length"
        );
        for (inp, out) in input.iter().zip(output.iter_mut()) {
            *out = self.process(*inp);
        }
    }

    /// Process a block of samples in place.
    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Clear all running state (filter history) without touching coefficients.
    fn reset(&mut self);

    /// Processing latency in samples. Biquads add none.
    fn latency_samples(&self) -> usize {
        0
    }
}
