//! Update controller: snapshot to coefficients to chain stages.
//!
//! Runs once per block before any sample is processed. The calculator is
//! driven unconditionally, so the same snapshot always produces bit-identical
//! coefficients and nothing depends on what the previous block did.

use cascade_core::{
    BiquadCoefficients, CUT_SLOTS, CutCascade, CutKind, FilterChain, FilterStage, PEAK_BANDS,
    cut_cascade, peak_coefficients,
};

use crate::snapshot::{ParamSnapshot, Slope};

/// Designed coefficients for one cut direction, plus its slope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutSettings {
    /// Sections for `slope.order()`.
    pub cascade: CutCascade,
    /// Selected slope.
    pub slope: Slope,
}

impl CutSettings {
    fn design(sample_rate: f32, cutoff: f32, slope: Slope, kind: CutKind) -> Self {
        Self {
            cascade: cut_cascade(sample_rate, cutoff, slope.order(), kind),
            slope,
        }
    }
}

/// Every coefficient set one block needs, computed from a snapshot.
///
/// Computing once and writing into both chains keeps left and right
/// identical by construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainCoefficients {
    /// Low-cut (high-pass) cascade.
    pub low_cut: CutSettings,
    /// Peak band coefficients, band 1 first.
    pub peaks: [BiquadCoefficients; PEAK_BANDS],
    /// High-cut (low-pass) cascade.
    pub high_cut: CutSettings,
}

impl ChainCoefficients {
    /// Runs the coefficient calculator for every stage of `snapshot`.
    pub fn from_snapshot(snapshot: &ParamSnapshot, sample_rate: f32) -> Self {
        let peaks = core::array::from_fn(|band| {
            let p = &snapshot.peaks[band];
            peak_coefficients(sample_rate, p.frequency, p.quality, p.gain_db)
        });

        Self {
            low_cut: CutSettings::design(
                sample_rate,
                snapshot.low_cut_frequency,
                snapshot.low_cut_slope,
                CutKind::LowCut,
            ),
            peaks,
            high_cut: CutSettings::design(
                sample_rate,
                snapshot.high_cut_frequency,
                snapshot.high_cut_slope,
                CutKind::HighCut,
            ),
        }
    }

    /// Writes these coefficients and the slope-dependent bypass flags into `chain`.
    pub fn apply(&self, chain: &mut FilterChain) {
        update_cut_filter(chain.low_cut_mut(), &self.low_cut);
        for (stage, coefficients) in chain.peaks_mut().iter_mut().zip(self.peaks.iter()) {
            stage.set_coefficients(*coefficients);
            stage.set_bypassed(false);
        }
        update_cut_filter(chain.high_cut_mut(), &self.high_cut);
    }
}

/// Loads one cut cascade into its four slots.
///
/// All slots are bypassed first; then every slot `i <= slope.index()` gets
/// section `i` and is enabled. A steeper slope therefore always enables a
/// superset of the slots a shallower one does.
pub fn update_cut_filter(slots: &mut [FilterStage], settings: &CutSettings) {
    debug_assert_eq!(slots.len(), CUT_SLOTS);

    for slot in slots.iter_mut() {
        slot.set_bypassed(true);
    }

    let last = settings.slope.index();
    for (i, slot) in slots.iter_mut().enumerate() {
        if i <= last
            && let Some(section) = settings.cascade.get(i)
        {
            slot.set_coefficients(*section);
            slot.set_bypassed(false);
        }
    }
}
