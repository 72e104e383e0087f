//! Parameter layout: the stable, index-ordered parameter surface.
//!
//! | Index | Name | Range | Default |
//! |---|---|---|---|
//! | 0 | LowCut Freq | 20–20000 Hz | 20 Hz |
//! | 1 | HighCut Freq | 20–20000 Hz | 20000 Hz |
//! | 2, 5, 8, 11 | Peak*n* Freq | 20–20000 Hz | 750 Hz |
//! | 3, 6, 9, 12 | Peak*n* Gain | −24–+24 dB | 0 dB |
//! | 4, 7, 10, 13 | Peak*n* Quality | 0.1–10 | 1.0 |
//! | 14 | LowCut Slope | 12/24/36/48 dB/oct | 12 |
//! | 15 | HighCut Slope | 12/24/36/48 dB/oct | 12 |
//!
//! Frequencies use a skew of 0.25 ([`ParamScale::Power(4.0)`](cascade_core::ParamScale)),
//! so half of a normalized control's travel covers 20 Hz to about 1.3 kHz.
//! Parameter IDs are `100 + index` and never change.

use cascade_core::{ParamDescriptor, ParamId};

use crate::snapshot::Slope;

/// Number of parameters exposed by the equalizer.
pub const PARAM_COUNT: usize = 16;

/// Lowest frequency any frequency parameter accepts, in Hz.
pub const MIN_FREQUENCY: f32 = 20.0;
/// Highest frequency any frequency parameter accepts, in Hz.
pub const MAX_FREQUENCY: f32 = 20000.0;
/// Peak gain bound in dB (symmetric).
pub const MAX_PEAK_GAIN_DB: f32 = 24.0;
/// Lowest peak quality.
pub const MIN_QUALITY: f32 = 0.1;
/// Highest peak quality.
pub const MAX_QUALITY: f32 = 10.0;

/// Index of the low-cut frequency.
pub const LOW_CUT_FREQ: usize = 0;
/// Index of the high-cut frequency.
pub const HIGH_CUT_FREQ: usize = 1;
/// Index of the low-cut slope choice.
pub const LOW_CUT_SLOPE: usize = 14;
/// Index of the high-cut slope choice.
pub const HIGH_CUT_SLOPE: usize = 15;

/// Index of peak band `band`'s (0-based) center frequency.
pub const fn peak_freq(band: usize) -> usize {
    2 + 3 * band
}

/// Index of peak band `band`'s (0-based) gain.
pub const fn peak_gain(band: usize) -> usize {
    3 + 3 * band
}

/// Index of peak band `band`'s (0-based) quality.
pub const fn peak_quality(band: usize) -> usize {
    4 + 3 * band
}

const ID_BASE: u32 = 100;

const fn freq(
    index: usize,
    name: &'static str,
    short: &'static str,
    string_id: &'static str,
    group: &'static str,
    default: f32,
) -> ParamDescriptor {
    ParamDescriptor::frequency_hz(name, short, MIN_FREQUENCY, MAX_FREQUENCY, default)
        .with_id(ParamId(ID_BASE + index as u32), string_id)
        .with_group(group)
}

const fn gain(
    index: usize,
    name: &'static str,
    short: &'static str,
    string_id: &'static str,
    group: &'static str,
) -> ParamDescriptor {
    ParamDescriptor::gain_db(name, short, -MAX_PEAK_GAIN_DB, MAX_PEAK_GAIN_DB, 0.0)
        .with_id(ParamId(ID_BASE + index as u32), string_id)
        .with_group(group)
}

const fn quality(
    index: usize,
    name: &'static str,
    short: &'static str,
    string_id: &'static str,
    group: &'static str,
) -> ParamDescriptor {
    ParamDescriptor::quality(name, short, MIN_QUALITY, MAX_QUALITY, 1.0)
        .with_id(ParamId(ID_BASE + index as u32), string_id)
        .with_group(group)
}

const fn slope(
    index: usize,
    name: &'static str,
    short: &'static str,
    string_id: &'static str,
    group: &'static str,
) -> ParamDescriptor {
    ParamDescriptor::choice(name, short, Slope::LABELS, 0)
        .with_id(ParamId(ID_BASE + index as u32), string_id)
        .with_group(group)
}

static DESCRIPTORS: [ParamDescriptor; PARAM_COUNT] = [
    freq(0, "LowCut Freq", "LC Freq", "low_cut_freq", "low_cut", MIN_FREQUENCY),
    freq(1, "HighCut Freq", "HC Freq", "high_cut_freq", "high_cut", MAX_FREQUENCY),
    freq(2, "Peak1 Freq", "P1 Freq", "peak1_freq", "peak1", 750.0),
    gain(3, "Peak1 Gain", "P1 Gain", "peak1_gain", "peak1"),
    quality(4, "Peak1 Quality", "P1 Q", "peak1_q", "peak1"),
    freq(5, "Peak2 Freq", "P2 Freq", "peak2_freq", "peak2", 750.0),
    gain(6, "Peak2 Gain", "P2 Gain", "peak2_gain", "peak2"),
    quality(7, "Peak2 Quality", "P2 Q", "peak2_q", "peak2"),
    freq(8, "Peak3 Freq", "P3 Freq", "peak3_freq", "peak3", 750.0),
    gain(9, "Peak3 Gain", "P3 Gain", "peak3_gain", "peak3"),
    quality(10, "Peak3 Quality", "P3 Q", "peak3_q", "peak3"),
    freq(11, "Peak4 Freq", "P4 Freq", "peak4_freq", "peak4", 750.0),
    gain(12, "Peak4 Gain", "P4 Gain", "peak4_gain", "peak4"),
    quality(13, "Peak4 Quality", "P4 Q", "peak4_q", "peak4"),
    slope(14, "LowCut Slope", "LC Slope", "low_cut_slope", "low_cut"),
    slope(15, "HighCut Slope", "HC Slope", "high_cut_slope", "high_cut"),
];

/// All descriptors in index order.
pub fn descriptors() -> &'static [ParamDescriptor; PARAM_COUNT] {
    &DESCRIPTORS
}

/// Descriptor of the parameter at `index`.
pub fn descriptor(index: usize) -> Option<&'static ParamDescriptor> {
    DESCRIPTORS.get(index)
}

/// Index of the parameter matching `name` by name, short name or string ID
/// (case-insensitive).
pub fn find(name: &str) -> Option<usize> {
    DESCRIPTORS.iter().position(|d| d.matches_name(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cascade_core::{ParamFlags, ParamScale, ParamUnit};

    #[test]
    fn indices_follow_declared_order() {
        assert_eq!(descriptors()[LOW_CUT_FREQ].name, "LowCut Freq");
        assert_eq!(descriptors()[HIGH_CUT_FREQ].name, "HighCut Freq");
        assert_eq!(descriptors()[LOW_CUT_SLOPE].name, "LowCut Slope");
        assert_eq!(descriptors()[HIGH_CUT_SLOPE].name, "HighCut Slope");
        for band in 0..4 {
            let n = band + 1;
            assert_eq!(descriptors()[peak_freq(band)].string_id, format!("peak{n}_freq"));
            assert_eq!(descriptors()[peak_gain(band)].string_id, format!("peak{n}_gain"));
            assert_eq!(descriptors()[peak_quality(band)].string_id, format!("peak{n}_q"));
        }
    }

    #[test]
    fn ids_are_stable_and_unique() {
        for (i, d) in descriptors().iter().enumerate() {
            assert_eq!(d.id, ParamId(100 + i as u32));
        }
    }

    #[test]
    fn ranges_and_defaults() {
        let lc = descriptor(LOW_CUT_FREQ).expect("low cut");
        assert_eq!((lc.min, lc.max, lc.default, lc.step), (20.0, 20000.0, 20.0, 1.0));
        assert_eq!(lc.scale, ParamScale::Power(4.0));
        assert_eq!(lc.unit, ParamUnit::Hertz);

        let hc = descriptor(HIGH_CUT_FREQ).expect("high cut");
        assert_eq!(hc.default, 20000.0);

        let g = descriptor(peak_gain(2)).expect("gain");
        assert_eq!((g.min, g.max, g.default, g.step), (-24.0, 24.0, 0.0, 0.5));

        let q = descriptor(peak_quality(3)).expect("quality");
        assert_eq!((q.min, q.max, q.default, q.step), (0.1, 10.0, 1.0, 0.05));

        let s = descriptor(LOW_CUT_SLOPE).expect("slope");
        assert_eq!((s.min, s.max, s.default), (0.0, 3.0, 0.0));
        assert!(s.flags.contains(ParamFlags::STEPPED));
        assert_eq!(s.choice_label(3.0), Some("48 db/Oct"));

        assert!(descriptor(PARAM_COUNT).is_none());
    }

    #[test]
    fn find_matches_every_naming() {
        assert_eq!(find("Peak3 Gain"), Some(9));
        assert_eq!(find("p3 gain"), Some(9));
        assert_eq!(find("PEAK3_GAIN"), Some(9));
        assert_eq!(find("lc slope"), Some(14));
        assert_eq!(find("tilt"), None);
    }
}
