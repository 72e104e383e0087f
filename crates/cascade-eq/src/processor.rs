//! Stereo processor: two independent filter chains driven by shared parameters.

use std::sync::Arc;

use cascade_core::{
    Effect, FilterChain, MAX_SAMPLE_RATE, MIN_SAMPLE_RATE, ParamDescriptor, ParameterInfo,
    linear_to_db,
};

use crate::error::{EqError, Result};
use crate::layout::{self, PARAM_COUNT};
use crate::shared::SharedParams;
use crate::snapshot::ParamSnapshot;
use crate::update::ChainCoefficients;

/// Stream setup passed to [`StereoEq::prepare_spec`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessSpec {
    /// Sample rate in Hz.
    pub sample_rate: f32,
    /// Largest block the host will pass to [`StereoEq::process`].
    pub max_block_size: usize,
}

impl ProcessSpec {
    /// Creates a spec.
    pub const fn new(sample_rate: f32, max_block_size: usize) -> Self {
        Self {
            sample_rate,
            max_block_size,
        }
    }

    /// Checks that the sample rate is finite and within
    /// `[MIN_SAMPLE_RATE, MAX_SAMPLE_RATE]` and the block size is non-zero.
    pub fn validate(&self) -> Result<()> {
        if !self.sample_rate.is_finite()
            || !(MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&self.sample_rate)
        {
            return Err(EqError::InvalidSampleRate(self.sample_rate));
        }
        if self.max_block_size == 0 {
            return Err(EqError::InvalidBlockSize(self.max_block_size));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct Prepared {
    spec: ProcessSpec,
    left: FilterChain,
    right: FilterChain,
}

/// Two-channel multiband equalizer.
///
/// Owns one [`FilterChain`] per channel. Both chains always carry identical
/// coefficients but keep independent running state. Parameters are read
/// from a [`SharedParams`] store at the start of every
/// [`process`](Self::process) call.
///
/// ## Lifecycle
///
/// 1. [`new`](Self::new) with the shared parameter store.
/// 2. [`prepare`](Self::prepare) once the sample rate is known. Calling it
///    again rebuilds both chains from scratch.
/// 3. [`process`](Self::process) once per block on the audio thread.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use cascade_eq::{SharedParams, StereoEq, layout};
///
/// let params = Arc::new(SharedParams::new());
/// let mut eq = StereoEq::new(Arc::clone(&params));
/// eq.prepare(48000.0, 512).unwrap();
///
/// params.set(layout::peak_gain(0), 6.0);
///
/// let mut left = vec![0.1f32; 512];
/// let mut right = vec![0.1f32; 512];
/// eq.process(&mut left, &mut right, 512);
/// ```
#[derive(Debug, Clone)]
pub struct StereoEq {
    params: Arc<SharedParams>,
    prepared: Option<Prepared>,
}

impl StereoEq {
    /// Creates an unprepared processor reading from `params`.
    pub fn new(params: Arc<SharedParams>) -> Self {
        Self {
            params,
            prepared: None,
        }
    }

    /// The shared parameter store.
    pub fn params(&self) -> &Arc<SharedParams> {
        &self.params
    }

    /// (Re)constructs both filter chains for a new stream.
    ///
    /// Running state starts cleared and coefficients are loaded from the
    /// current parameters, so the first block already uses the right filters.
    ///
    /// # Errors
    ///
    /// [`EqError::InvalidSampleRate`] or [`EqError::InvalidBlockSize`]; the
    /// processor keeps its previous state on error.
    pub fn prepare(&mut self, sample_rate: f32, max_block_size: usize) -> Result<()> {
        self.prepare_spec(ProcessSpec::new(sample_rate, max_block_size))
    }

    /// [`prepare`](Self::prepare) taking a [`ProcessSpec`].
    pub fn prepare_spec(&mut self, spec: ProcessSpec) -> Result<()> {
        spec.validate()?;

        let mut prepared = Prepared {
            spec,
            left: FilterChain::new(),
            right: FilterChain::new(),
        };
        let coefficients = ChainCoefficients::from_snapshot(&self.params.snapshot(), spec.sample_rate);
        coefficients.apply(&mut prepared.left);
        coefficients.apply(&mut prepared.right);
        self.prepared = Some(prepared);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sample_rate = spec.sample_rate,
            max_block_size = spec.max_block_size,
            "stereo eq prepared"
        );

        Ok(())
    }

    /// Returns `true` once [`prepare`](Self::prepare) has succeeded.
    pub fn is_prepared(&self) -> bool {
        self.prepared.is_some()
    }

    /// Stream setup of the last successful [`prepare`](Self::prepare).
    pub fn spec(&self) -> Option<ProcessSpec> {
        self.prepared.as_ref().map(|p| p.spec)
    }

    /// Refreshes coefficients from the shared store, then filters
    /// `num_samples` samples of each channel in place.
    ///
    /// # Panics
    ///
    /// Panics if called before [`prepare`](Self::prepare), or if either
    /// buffer is shorter than `num_samples`.
    pub fn process(&mut self, left: &mut [f32], right: &mut [f32], num_samples: usize) {
        self.update_filters();
        self.process_block(&mut left[..num_samples], &mut right[..num_samples]);
    }

    /// Runs the update controller with the current shared parameters.
    ///
    /// # Panics
    ///
    /// Panics if called before [`prepare`](Self::prepare).
    pub fn update_filters(&mut self) {
        let snapshot = self.params.snapshot();
        self.apply_snapshot(&snapshot);
    }

    /// Runs the update controller for an explicit snapshot.
    ///
    /// Both chains receive identical coefficients and bypass flags.
    ///
    /// # Panics
    ///
    /// Panics if called before [`prepare`](Self::prepare).
    pub fn apply_snapshot(&mut self, snapshot: &ParamSnapshot) {
        let prepared = self.prepared_mut();
        let coefficients = ChainCoefficients::from_snapshot(snapshot, prepared.spec.sample_rate);
        coefficients.apply(&mut prepared.left);
        coefficients.apply(&mut prepared.right);
    }

    /// Filters both channels in place with the coefficients already loaded.
    ///
    /// # Panics
    ///
    /// Panics if called before [`prepare`](Self::prepare). Debug builds also
    /// panic if the buffers differ in length.
    pub fn process_block(&mut self, left: &mut [f32], right: &mut [f32]) {
        debug_assert_eq!(
            left.len(),
            right.len(),
            "Left and right buffers must have same length"
        );
        let prepared = self.prepared_mut();
        prepared.left.process_block_inplace(left);
        prepared.right.process_block_inplace(right);
    }

    /// Clears the running state of both chains; coefficients are kept.
    pub fn reset(&mut self) {
        if let Some(prepared) = self.prepared.as_mut() {
            prepared.left.reset();
            prepared.right.reset();
        }
    }

    /// Combined magnitude response in dB at `frequency`, from the
    /// coefficients currently loaded. `None` before [`prepare`](Self::prepare).
    pub fn magnitude_db_at(&self, frequency: f32) -> Option<f32> {
        self.prepared
            .as_ref()
            .map(|p| linear_to_db(p.left.magnitude_at(frequency, p.spec.sample_rate)))
    }

    /// Left channel chain.
    pub fn left_chain(&self) -> Option<&FilterChain> {
        self.prepared.as_ref().map(|p| &p.left)
    }

    /// Right channel chain.
    pub fn right_chain(&self) -> Option<&FilterChain> {
        self.prepared.as_ref().map(|p| &p.right)
    }

    /// Added latency in samples. Biquads are sample-synchronous, so this is 0.
    pub fn latency_samples(&self) -> usize {
        0
    }

    fn prepared_mut(&mut self) -> &mut Prepared {
        let Some(prepared) = self.prepared.as_mut() else {
            panic!("StereoEq used before prepare(): call prepare(sample_rate, max_block_size) first");
        };
        prepared
    }
}

impl ParameterInfo for StereoEq {
    fn param_count(&self) -> usize {
        PARAM_COUNT
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        layout::descriptor(index).copied()
    }

    fn get_param(&self, index: usize) -> f32 {
        self.params.get(index).unwrap_or(0.0)
    }

    fn set_param(&mut self, index: usize, value: f32) {
        self.params.set(index, value);
    }
}
