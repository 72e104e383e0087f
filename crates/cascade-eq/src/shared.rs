//! Lock-free parameter store shared between control threads and the audio thread.
//!
//! Each parameter lives in its own [`AtomicU32`] holding the `f32` bit
//! pattern, so individual values are never torn and neither side ever blocks.
//! Control threads call the setters at any time; the audio thread calls
//! [`SharedParams::snapshot`] once per block.
//!
//! Cross-parameter consistency is not guaranteed: a snapshot taken while a
//! control thread is writing may mix old and new values of different
//! parameters. Every mix is a valid setting, so processing never depends on it.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::error::{EqError, Result};
use crate::layout::{self, PARAM_COUNT};
use crate::snapshot::ParamSnapshot;

/// Atomic, index-addressed store of every EQ parameter in plain units.
///
/// Share it between threads with an `Arc`.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use cascade_eq::{SharedParams, Slope, layout};
///
/// let params = Arc::new(SharedParams::new());
/// let control = Arc::clone(&params);
///
/// std::thread::spawn(move || {
///     control.set(layout::LOW_CUT_FREQ, 80.0);
///     control.set(layout::LOW_CUT_SLOPE, 3.0);
/// })
/// .join()
/// .unwrap();
///
/// let snapshot = params.snapshot();
/// assert_eq!(snapshot.low_cut_frequency, 80.0);
/// assert_eq!(snapshot.low_cut_slope, Slope::Db48);
/// ```
#[derive(Debug)]
pub struct SharedParams {
    values: [AtomicU32; PARAM_COUNT],
}

impl SharedParams {
    /// Creates a store initialized to every parameter's default.
    pub fn new() -> Self {
        Self::from_snapshot(&ParamSnapshot::default())
    }

    /// Creates a store initialized from `snapshot` (values clamped).
    pub fn from_snapshot(snapshot: &ParamSnapshot) -> Self {
        let store = Self {
            values: core::array::from_fn(|_| AtomicU32::new(0)),
        };
        store.store_snapshot(snapshot);

        #[cfg(feature = "tracing")]
        tracing::debug!(params = PARAM_COUNT, "shared parameter store created");

        store
    }

    /// Plain value of the parameter at `index`, or `None` if out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.values
            .get(index)
            .map(|v| f32::from_bits(v.load(Ordering::Acquire)))
    }

    /// Stores `value` for the parameter at `index`, clamped to its range.
    ///
    /// Out-of-range indices are ignored.
    #[inline]
    pub fn set(&self, index: usize, value: f32) {
        if let Some((cell, desc)) = self.values.get(index).zip(layout::descriptor(index)) {
            cell.store(desc.clamp(value).to_bits(), Ordering::Release);
        }
    }

    /// Normalized (0.0 to 1.0) value of the parameter at `index`, following
    /// its scale.
    pub fn get_normalized(&self, index: usize) -> Option<f32> {
        let desc = layout::descriptor(index)?;
        self.get(index).map(|v| desc.normalize(v))
    }

    /// Stores a normalized (0.0 to 1.0) value for the parameter at `index`.
    pub fn set_normalized(&self, index: usize, normalized: f32) {
        if let Some(desc) = layout::descriptor(index) {
            self.set(index, desc.denormalize(normalized));
        }
    }

    /// Stores `value` for the parameter named `name` (name, short name or
    /// string ID, case-insensitive). Returns the resolved index.
    pub fn set_by_name(&self, name: &str, value: f32) -> Result<usize> {
        let index = layout::find(name).ok_or_else(|| EqError::UnknownParameter(name.to_owned()))?;
        self.set(index, value);
        Ok(index)
    }

    /// Plain value of the parameter named `name`.
    pub fn get_by_name(&self, name: &str) -> Result<f32> {
        layout::find(name)
            .and_then(|index| self.get(index))
            .ok_or_else(|| EqError::UnknownParameter(name.to_owned()))
    }

    /// Every stored value in layout order.
    pub fn values(&self) -> [f32; PARAM_COUNT] {
        core::array::from_fn(|i| f32::from_bits(self.values[i].load(Ordering::Acquire)))
    }

    /// Reads every cell once and assembles a [`ParamSnapshot`].
    ///
    /// Lock-free and allocation-free; safe to call from the audio thread.
    pub fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot::from_values(&self.values())
    }

    /// Writes every field of `snapshot` into the store.
    pub fn store_snapshot(&self, snapshot: &ParamSnapshot) {
        for (index, value) in snapshot.to_values().into_iter().enumerate() {
            self.set(index, value);
        }
    }

    /// Restores every parameter to its default.
    pub fn reset_to_defaults(&self) {
        for (index, desc) in layout::descriptors().iter().enumerate() {
            self.set(index, desc.default);
        }
    }
}

impl Default for SharedParams {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Slope;
    use std::sync::Arc;

    #[test]
    fn starts_at_defaults() {
        let params = SharedParams::new();
        for (i, desc) in layout::descriptors().iter().enumerate() {
            assert_eq!(params.get(i), Some(desc.default));
        }
        assert_eq!(params.snapshot(), ParamSnapshot::default());
        assert_eq!(params.get(PARAM_COUNT), None);
    }

    #[test]
    fn set_clamps_to_range() {
        let params = SharedParams::new();
        params.set(layout::HIGH_CUT_FREQ, 96000.0);
        assert_eq!(params.get(layout::HIGH_CUT_FREQ), Some(20000.0));

        params.set(layout::peak_quality(0), -1.0);
        assert_eq!(params.get(layout::peak_quality(0)), Some(0.1));

        params.set(layout::peak_gain(3), f32::NAN);
        assert_eq!(params.get(layout::peak_gain(3)), Some(0.0));

        params.set(layout::LOW_CUT_SLOPE, 1.7);
        assert_eq!(params.get(layout::LOW_CUT_SLOPE), Some(2.0));

        params.set(PARAM_COUNT + 3, 1.0);
    }

    #[test]
    fn by_name_access() {
        let params = SharedParams::new();
        assert_eq!(params.set_by_name("peak2_gain", 6.0), Ok(layout::peak_gain(1)));
        assert_eq!(params.get_by_name("Peak2 Gain"), Ok(6.0));
        assert_eq!(
            params.set_by_name("presence", 1.0),
            Err(EqError::UnknownParameter("presence".into()))
        );
        assert!(params.get_by_name("").is_err());
    }

    #[test]
    fn normalized_access_follows_skew() {
        let params = SharedParams::new();
        params.set_normalized(layout::peak_freq(0), 0.5);
        let hz = params.get(layout::peak_freq(0)).expect("in range");
        assert!((hz - 1268.75).abs() < 0.01, "got {hz}");

        params.set(layout::peak_freq(0), 20000.0);
        assert_eq!(params.get_normalized(layout::peak_freq(0)), Some(1.0));
        assert_eq!(params.get_normalized(PARAM_COUNT), None);
    }

    #[test]
    fn snapshot_round_trip() {
        let mut s = ParamSnapshot::default();
        s.low_cut_frequency = 100.0;
        s.low_cut_slope = Slope::Db24;
        s.peaks[2].gain_db = -7.5;
        let params = SharedParams::from_snapshot(&s);
        assert_eq!(params.snapshot(), s);

        params.reset_to_defaults();
        assert_eq!(params.snapshot(), ParamSnapshot::default());
    }

    #[test]
    fn concurrent_writers_never_tear_values() {
        let params = Arc::new(SharedParams::new());
        let writers: Vec<_> = (0..4)
            .map(|t| {
                let p = Arc::clone(&params);
                std::thread::spawn(move || {
                    for i in 0..2000 {
                        let value = if (i + t) % 2 == 0 { 100.0 } else { 5000.0 };
                        p.set(layout::LOW_CUT_FREQ, value);
                    }
                })
            })
            .collect();

        for _ in 0..2000 {
            let v = params.snapshot().low_cut_frequency;
            assert!(v == 20.0 || v == 100.0 || v == 5000.0, "torn value {v}");
        }
        for w in writers {
            w.join().expect("writer thread");
        }
    }
}
