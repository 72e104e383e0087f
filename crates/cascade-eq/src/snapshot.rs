//! Parameter snapshot: one immutable bundle of EQ settings per block.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::EqError;
use crate::layout::{self, PARAM_COUNT};

/// Number of peak bands in a snapshot.
pub const PEAK_BAND_COUNT: usize = cascade_core::PEAK_BANDS;

/// Cut filter steepness.
///
/// Each step adds one second-order section, so a slope's index is also the
/// index of the last enabled cascade slot.
///
/// With the `serde` feature a slope serializes as its dB/octave number
/// (`12`, `24`, `36` or `48`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u32", into = "u32"))]
pub enum Slope {
    /// 12 dB/octave, one section (2nd order).
    #[default]
    Db12,
    /// 24 dB/octave, two sections (4th order).
    Db24,
    /// 36 dB/octave, three sections (6th order).
    Db36,
    /// 48 dB/octave, four sections (8th order).
    Db48,
}

impl Slope {
    /// Every slope, shallowest first.
    pub const ALL: [Slope; 4] = [Slope::Db12, Slope::Db24, Slope::Db36, Slope::Db48];

    /// Display labels indexed by [`index`](Self::index).
    pub const LABELS: &'static [&'static str] = &["12 db/Oct", "24 db/Oct", "36 db/Oct", "48 db/Oct"];

    /// Choice index, 0 for 12 dB/octave through 3 for 48 dB/octave.
    pub const fn index(self) -> usize {
        match self {
            Slope::Db12 => 0,
            Slope::Db24 => 1,
            Slope::Db36 => 2,
            Slope::Db48 => 3,
        }
    }

    /// Slope for a choice index.
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Slope::Db12),
            1 => Some(Slope::Db24),
            2 => Some(Slope::Db36),
            3 => Some(Slope::Db48),
            _ => None,
        }
    }

    /// Slope for a stored choice parameter value, rounded and clamped.
    pub fn from_param(value: f32) -> Self {
        if value.is_nan() || value < 0.5 {
            return Slope::Db12;
        }
        match value {
            v if v < 1.5 => Slope::Db24,
            v if v < 2.5 => Slope::Db36,
            _ => Slope::Db48,
        }
    }

    /// Butterworth filter order, `2 × (index + 1)`.
    pub const fn order(self) -> usize {
        2 * (self.index() + 1)
    }

    /// Number of enabled cascade sections.
    pub const fn stage_count(self) -> usize {
        self.index() + 1
    }

    /// Asymptotic attenuation in dB per octave.
    pub const fn db_per_octave(self) -> u32 {
        12 * (self.index() as u32 + 1)
    }

    /// Display label, e.g. `"24 db/Oct"`.
    pub const fn label(self) -> &'static str {
        Self::LABELS[self.index()]
    }
}

impl TryFrom<u32> for Slope {
    type Error = EqError;

    fn try_from(db_per_octave: u32) -> Result<Self, Self::Error> {
        match db_per_octave {
            12 => Ok(Slope::Db12),
            24 => Ok(Slope::Db24),
            36 => Ok(Slope::Db36),
            48 => Ok(Slope::Db48),
            other => Err(EqError::InvalidSlope(other)),
        }
    }
}

impl From<Slope> for u32 {
    fn from(slope: Slope) -> Self {
        slope.db_per_octave()
    }
}

impl core::fmt::Display for Slope {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Settings of one peak (bell) band.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PeakBand {
    /// Center frequency in Hz.
    pub frequency: f32,
    /// Gain at the center frequency in dB.
    pub gain_db: f32,
    /// Resonance (Q factor, > 0).
    pub quality: f32,
}

impl Default for PeakBand {
    fn default() -> Self {
        Self {
            frequency: 750.0,
            gain_db: 0.0,
            quality: 1.0,
        }
    }
}

/// Complete EQ settings, read once per processing block.
///
/// Defaults are transparent: low cut at 20 Hz and high cut at 20 kHz (both
/// 12 dB/octave), all peaks at 750 Hz with 0 dB gain and Q 1.
///
/// # Example
///
/// ```rust
/// use cascade_eq::{ParamSnapshot, Slope};
///
/// let mut snapshot = ParamSnapshot::default();
/// snapshot.low_cut_frequency = 80.0;
/// snapshot.low_cut_slope = Slope::Db24;
/// snapshot.peaks[0].gain_db = 3.0;
///
/// let values = snapshot.to_values();
/// assert_eq!(ParamSnapshot::from_values(&values), snapshot);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParamSnapshot {
    /// Low-cut (high-pass) cutoff in Hz.
    pub low_cut_frequency: f32,
    /// Low-cut steepness.
    pub low_cut_slope: Slope,
    /// High-cut (low-pass) cutoff in Hz.
    pub high_cut_frequency: f32,
    /// High-cut steepness.
    pub high_cut_slope: Slope,
    /// The four peak bands.
    ///
    /// Settings files may list fewer than four; missing bands take defaults.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "deserialize_peaks"))]
    pub peaks: [PeakBand; PEAK_BAND_COUNT],
}

#[cfg(feature = "serde")]
fn deserialize_peaks<'de, D>(deserializer: D) -> Result<[PeakBand; PEAK_BAND_COUNT], D::Error>
where
    D: serde::Deserializer<'de>,
{
    let listed = Vec::<PeakBand>::deserialize(deserializer)?;
    if listed.len() > PEAK_BAND_COUNT {
        return Err(serde::de::Error::invalid_length(
            listed.len(),
            &"at most 4 peak bands",
        ));
    }
    let mut peaks = [PeakBand::default(); PEAK_BAND_COUNT];
    peaks[..listed.len()].copy_from_slice(&listed);
    Ok(peaks)
}

impl Default for ParamSnapshot {
    fn default() -> Self {
        Self {
            low_cut_frequency: layout::MIN_FREQUENCY,
            low_cut_slope: Slope::Db12,
            high_cut_frequency: layout::MAX_FREQUENCY,
            high_cut_slope: Slope::Db12,
            peaks: [PeakBand::default(); PEAK_BAND_COUNT],
        }
    }
}

impl ParamSnapshot {
    /// Builds a snapshot from plain parameter values in layout order.
    ///
    /// Values are clamped to their descriptor ranges; slope values are
    /// rounded to the nearest choice.
    pub fn from_values(values: &[f32; PARAM_COUNT]) -> Self {
        let value = |index: usize| {
            let raw = values[index];
            layout::descriptor(index).map_or(raw, |d| d.clamp(raw))
        };

        let peaks = core::array::from_fn(|band| PeakBand {
            frequency: value(layout::peak_freq(band)),
            gain_db: value(layout::peak_gain(band)),
            quality: value(layout::peak_quality(band)),
        });

        Self {
            low_cut_frequency: value(layout::LOW_CUT_FREQ),
            low_cut_slope: Slope::from_param(value(layout::LOW_CUT_SLOPE)),
            high_cut_frequency: value(layout::HIGH_CUT_FREQ),
            high_cut_slope: Slope::from_param(value(layout::HIGH_CUT_SLOPE)),
            peaks,
        }
    }

    /// Plain parameter values in layout order.
    pub fn to_values(&self) -> [f32; PARAM_COUNT] {
        let mut values = [0.0; PARAM_COUNT];
        values[layout::LOW_CUT_FREQ] = self.low_cut_frequency;
        values[layout::HIGH_CUT_FREQ] = self.high_cut_frequency;
        for (band, peak) in self.peaks.iter().enumerate() {
            values[layout::peak_freq(band)] = peak.frequency;
            values[layout::peak_gain(band)] = peak.gain_db;
            values[layout::peak_quality(band)] = peak.quality;
        }
        values[layout::LOW_CUT_SLOPE] = self.low_cut_slope.index() as f32;
        values[layout::HIGH_CUT_SLOPE] = self.high_cut_slope.index() as f32;
        values
    }

    /// Copy of this snapshot with every value clamped to its parameter range.
    pub fn clamped(&self) -> Self {
        Self::from_values(&self.to_values())
    }
}
