//! Fixed-topology, single-channel filter chain.
//!
//! Every chain has exactly [`CHAIN_LEN`] slots in this order:
//!
//! ```text
//! index:  0    1    2    3    4     5     6     7     8    9    10   11
//! slot:  lc0  lc1  lc2  lc3  pk1   pk2   pk3   pk4   hc0  hc1  hc2  hc3
//!        └── low cut ───┘    └──── peak bands ───┘   └── high cut ──┘
//! ```
//!
//! Only coefficients and bypass flags change at runtime; the slot layout is
//! fixed at construction.

use crate::biquad::BiquadCoefficients;
use crate::effect::Effect;
use crate::stage::{FilterStage, StageKind};

/// Cascade slots per cut direction.
pub const CUT_SLOTS: usize = 4;

/// Number of independent peak bands.
pub const PEAK_BANDS: usize = 4;

/// Total slot count of a chain.
pub const CHAIN_LEN: usize = CUT_SLOTS + PEAK_BANDS + CUT_SLOTS;

const LOW_CUT_START: usize = 0;
const PEAK_START: usize = LOW_CUT_START + CUT_SLOTS;
const HIGH_CUT_START: usize = PEAK_START + PEAK_BANDS;

/// Addresses one slot of a [`FilterChain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainPosition {
    /// Low-cut cascade slot (0..4).
    LowCut(usize),
    /// Peak band (0..4).
    Peak(usize),
    /// High-cut cascade slot (0..4).
    HighCut(usize),
}

impl ChainPosition {
    /// Flat slot index in `0..CHAIN_LEN`, or `None` if the sub-index is out of range.
    pub const fn index(self) -> Option<usize> {
        match self {
            Self::LowCut(i) if i < CUT_SLOTS => Some(LOW_CUT_START + i),
            Self::Peak(i) if i < PEAK_BANDS => Some(PEAK_START + i),
            Self::HighCut(i) if i < CUT_SLOTS => Some(HIGH_CUT_START + i),
            _ => None,
        }
    }
}

/// One channel's complete signal path: 4 low-cut slots, 4 peaks, 4 high-cut slots.
///
/// A new chain has identity coefficients everywhere and its cut slots
/// bypassed, so it is transparent until coefficients are written.
///
/// # Example
///
/// ```rust
/// use cascade_core::{CutKind, Effect, FilterChain, cut_cascade};
///
/// let mut chain = FilterChain::new();
/// let cascade = cut_cascade(48000.0, 80.0, 4, CutKind::LowCut);
/// for (slot, coeffs) in chain.low_cut_mut().iter_mut().zip(cascade.iter()) {
///     slot.set_coefficients(*coeffs);
///     slot.set_bypassed(false);
/// }
///
/// let mut block = [0.0f32; 64];
/// block[0] = 1.0;
/// chain.process_block_inplace(&mut block);
/// ```
#[derive(Debug, Clone)]
pub struct FilterChain {
    stages: [FilterStage; CHAIN_LEN],
}

impl FilterChain {
    /// Creates a transparent chain.
    pub fn new() -> Self {
        let stages = core::array::from_fn(|i| {
            if (PEAK_START..HIGH_CUT_START).contains(&i) {
                FilterStage::new(StageKind::Peak)
            } else {
                let mut stage = FilterStage::new(StageKind::Cut);
                stage.set_bypassed(true);
                stage
            }
        });
        Self { stages }
    }

    /// All slots in processing order.
    #[inline]
    pub fn stages(&self) -> &[FilterStage; CHAIN_LEN] {
        &self.stages
    }

    /// The slot at `position`.
    pub fn stage(&self, position: ChainPosition) -> Option<&FilterStage> {
        position.index().map(|i| &self.stages[i])
    }

    /// Mutable access to the slot at `position`.
    pub fn stage_mut(&mut self, position: ChainPosition) -> Option<&mut FilterStage> {
        position.index().map(|i| &mut self.stages[i])
    }

    /// The four low-cut cascade slots.
    #[inline]
    pub fn low_cut(&self) -> &[FilterStage] {
        &self.stages[LOW_CUT_START..PEAK_START]
    }

    /// Mutable low-cut cascade slots.
    #[inline]
    pub fn low_cut_mut(&mut self) -> &mut [FilterStage] {
        &mut self.stages[LOW_CUT_START..PEAK_START]
    }

    /// The four peak slots.
    #[inline]
    pub fn peaks(&self) -> &[FilterStage] {
        &self.stages[PEAK_START..HIGH_CUT_START]
    }

    /// Mutable peak slots.
    #[inline]
    pub fn peaks_mut(&mut self) -> &mut [FilterStage] {
        &mut self.stages[PEAK_START..HIGH_CUT_START]
    }

    /// The four high-cut cascade slots.
    #[inline]
    pub fn high_cut(&self) -> &[FilterStage] {
        &self.stages[HIGH_CUT_START..]
    }

    /// Mutable high-cut cascade slots.
    #[inline]
    pub fn high_cut_mut(&mut self) -> &mut [FilterStage] {
        &mut self.stages[HIGH_CUT_START..]
    }

    /// Coefficients of every slot, in processing order.
    pub fn coefficients(&self) -> [BiquadCoefficients; CHAIN_LEN] {
        core::array::from_fn(|i| *self.stages[i].coefficients())
    }

    /// Bypass flags of every slot, in processing order.
    pub fn bypass_flags(&self) -> [bool; CHAIN_LEN] {
        core::array::from_fn(|i| self.stages[i].is_bypassed())
    }

    /// Combined linear magnitude of all active slots at `frequency`.
    pub fn magnitude_at(&self, frequency: f32, sample_rate: f32) -> f32 {
        self.stages
            .iter()
            .map(|s| s.magnitude_at(frequency, sample_rate))
            .product()
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for FilterChain {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        self.stages
            .iter_mut()
            .fold(input, |x, stage| stage.process_sample(x))
    }

    fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.reset();
        }
    }
}
