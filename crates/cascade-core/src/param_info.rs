//! Parameter introspection for host binding layers.
//!
//! [`ParameterInfo`] exposes an index-addressed parameter surface. Each
//! parameter is described by a [`ParamDescriptor`] carrying everything a
//! control surface needs: display names, range, default, step, a stable
//! [`ParamId`], a normalization curve ([`ParamScale`]) and capability
//! [`ParamFlags`].
//!
//! # Example
//!
//! ```rust
//! use cascade_core::{ParameterInfo, ParamDescriptor, ParamId};
//!
//! struct Bell {
//!     gain_db: f32,
//! }
//!
//! impl ParameterInfo for Bell {
//!     fn param_count(&self) -> usize { 1 }
//!
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         match index {
//!             0 => Some(ParamDescriptor::gain_db("Bell Gain", "Gain", -24.0, 24.0, 0.0)
//!                 .with_id(ParamId(1), "bell_gain")),
//!             _ => None,
//!         }
//!     }
//!
//!     fn get_param(&self, index: usize) -> f32 {
//!         match index {
//!             0 => self.gain_db,
//!             _ => 0.0,
//!         }
//!     }
//!
//!     fn set_param(&mut self, index: usize, value: f32) {
//!         if index == 0 {
//!             self.gain_db = value.clamp(-24.0, 24.0);
//!         }
//!     }
//! }
//!
//! let bell = Bell { gain_db: 3.0 };
//! assert_eq!(bell.find_param_by_name("gain"), Some(0));
//! ```

/// Scaling curve for parameter normalization.
///
/// Determines how a plain value maps to normalized \[0.0, 1.0\] space.
///
/// - **Linear**: `normalized = (value - min) / (max - min)`
/// - **Logarithmic**: `normalized = ln(value/min) / ln(max/min)`
/// - **Power(exp)**: `normalized = ((value - min) / (max - min)).powf(1.0 / exp)`
///
/// `Power(4.0)` is a skew of 0.25: a 20 Hz to 20 kHz slider spends most of
/// its travel below 5 kHz.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ParamScale {
    /// Equal resolution across the range.
    #[default]
    Linear,
    /// More resolution at low values. Requires `min > 0.0`.
    Logarithmic,
    /// Power curve; exponents above 1.0 favour the low end of the range.
    Power(f32),
}

/// Stable parameter identifier that survives reordering.
///
/// Once assigned, a `ParamId` never changes for a given parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Parameter capability flags.
///
/// # Example
///
/// ```rust
/// use cascade_core::ParamFlags;
///
/// let flags = ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED);
/// assert!(flags.contains(ParamFlags::STEPPED));
/// assert!(!ParamFlags::AUTOMATABLE.contains(ParamFlags::STEPPED));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Host can automate this parameter.
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Parameter takes discrete integer values (choice lists).
    pub const STEPPED: Self = Self(1 << 1);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// Trait for processors that expose introspectable parameters.
///
/// Parameters are addressed by a zero-based index that is stable for the
/// lifetime of the implementor. Implementations clamp written values to the
/// descriptor range and ignore out-of-range indices.
pub trait ParameterInfo {
    /// Number of parameters; valid indices are `0..param_count()`.
    fn param_count(&self) -> usize;

    /// Descriptor for the parameter at `index`, or `None` if out of range.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current plain value of the parameter at `index` (`0.0` if out of range).
    fn get_param(&self, index: usize) -> f32;

    /// Sets the plain value of the parameter at `index`, clamped to its range.
    fn set_param(&mut self, index: usize, value: f32);

    /// Find a parameter index by name (case-insensitive).
    ///
    /// Matches against [`ParamDescriptor::name`], [`ParamDescriptor::short_name`]
    /// and [`ParamDescriptor::string_id`].
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_info(i).is_some_and(|d| d.matches_name(name)))
    }

    /// Stable [`ParamId`] of the parameter at `index`.
    fn param_id(&self, index: usize) -> Option<ParamId> {
        self.param_info(index).map(|d| d.id)
    }

    /// Finds a parameter index by its stable [`ParamId`].
    ///
    /// O(n) scan, meant for setup paths.
    fn param_index_by_id(&self, id: ParamId) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_info(i).is_some_and(|d| d.id == id))
    }
}

/// Describes a single parameter's metadata for display and validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name (e.g. "LowCut Freq").
    pub name: &'static str,
    /// Short name for narrow displays, 8 characters or less.
    pub short_name: &'static str,
    /// Unit used when formatting values.
    pub unit: ParamUnit,
    /// Minimum plain value.
    pub min: f32,
    /// Maximum plain value.
    pub max: f32,
    /// Value on construction.
    pub default: f32,
    /// Increment for stepped controls and value snapping.
    pub step: f32,
    /// Stable numeric ID. `ParamId(0)` means unassigned.
    pub id: ParamId,
    /// Stable string ID used in settings files, e.g. `"peak1_freq"`.
    pub string_id: &'static str,
    /// Normalization curve.
    pub scale: ParamScale,
    /// Capability flags.
    pub flags: ParamFlags,
    /// Group for host tree display (`""` is top level).
    pub group: &'static str,
    /// Display labels of a choice parameter, indexed by plain value.
    pub choices: &'static [&'static str],
}

impl ParamDescriptor {
    /// Frequency parameter in Hz with a skewed (`Power(4.0)`) mapping and 1 Hz steps.
    pub const fn frequency_hz(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Hertz,
            min,
            max,
            default,
            step: 1.0,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Power(4.0),
            flags: ParamFlags::AUTOMATABLE,
            group: "",
            choices: &[],
        }
    }

    /// Gain parameter in dB with 0.5 dB steps.
    pub const fn gain_db(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Decibels,
            min,
            max,
            default,
            step: 0.5,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
            flags: ParamFlags::AUTOMATABLE,
            group: "",
            choices: &[],
        }
    }

    /// Dimensionless resonance (Q) parameter with 0.05 steps.
    pub const fn quality(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            min,
            max,
            default,
            step: 0.05,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
            flags: ParamFlags::AUTOMATABLE,
            group: "",
            choices: &[],
        }
    }

    /// Stepped choice parameter over `0..choices.len()`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cascade_core::{ParamDescriptor, ParamFlags};
    ///
    /// const MODES: &[&str] = &["Soft", "Hard"];
    /// let desc = ParamDescriptor::choice("Mode", "Mode", MODES, 0);
    /// assert_eq!(desc.max, 1.0);
    /// assert!(desc.flags.contains(ParamFlags::STEPPED));
    /// assert_eq!(desc.choice_label(1.0), Some("Hard"));
    /// ```
    pub const fn choice(
        name: &'static str,
        short_name: &'static str,
        choices: &'static [&'static str],
        default_index: usize,
    ) -> Self {
        let last = if choices.is_empty() { 0 } else { choices.len() - 1 };
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            min: 0.0,
            max: last as f32,
            default: default_index as f32,
            step: 1.0,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
            flags: ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED),
            group: "",
            choices,
        }
    }

    /// Sets the stable parameter ID and string ID.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Sets the normalization scale.
    pub const fn with_scale(mut self, scale: ParamScale) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the parameter flags.
    pub const fn with_flags(mut self, flags: ParamFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the parameter group.
    pub const fn with_group(mut self, group: &'static str) -> Self {
        self.group = group;
        self
    }

    /// Returns `true` if `name` equals the name, short name or string ID,
    /// ignoring ASCII case.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.short_name.eq_ignore_ascii_case(name)
            || (!self.string_id.is_empty() && self.string_id.eq_ignore_ascii_case(name))
    }

    /// Clamps a value to this parameter's range.
    ///
    /// NaN maps to the default. Stepped parameters are rounded to the nearest
    /// step.
    ///
    /// ```rust
    /// use cascade_core::ParamDescriptor;
    ///
    /// let q = ParamDescriptor::quality("Q", "Q", 0.1, 10.0, 1.0);
    /// assert_eq!(q.clamp(0.0), 0.1);
    /// assert_eq!(q.clamp(50.0), 10.0);
    /// assert_eq!(q.clamp(f32::NAN), 1.0);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.default;
        }
        let clamped = value.clamp(self.min, self.max);
        if self.flags.contains(ParamFlags::STEPPED) && self.step > 0.0 {
            let steps = libm::roundf((clamped - self.min) / self.step);
            (self.min + steps * self.step).min(self.max)
        } else {
            clamped
        }
    }

    /// Converts a plain value to normalized range (0.0 to 1.0).
    ///
    /// ```rust
    /// use cascade_core::ParamDescriptor;
    ///
    /// let f = ParamDescriptor::frequency_hz("Freq", "Freq", 20.0, 20000.0, 750.0);
    /// assert_eq!(f.normalize(20.0), 0.0);
    /// assert_eq!(f.normalize(20000.0), 1.0);
    /// assert!(f.normalize(1000.0) > 0.4);
    /// ```
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        let value = self.clamp(value);
        match self.scale {
            ParamScale::Linear => (value - self.min) / range,
            ParamScale::Logarithmic => {
                if self.min <= 0.0 || value <= 0.0 {
                    return 0.0;
                }
                libm::logf(value / self.min) / libm::logf(self.max / self.min)
            }
            ParamScale::Power(exp) => {
                let linear = (value - self.min) / range;
                libm::powf(linear, 1.0 / exp)
            }
        }
    }

    /// Converts a normalized value (0.0 to 1.0) to the plain range.
    ///
    /// Inverse of [`normalize`](Self::normalize). Input outside \[0, 1\] is
    /// clamped first.
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        let n = if normalized.is_nan() { 0.0 } else { normalized.clamp(0.0, 1.0) };
        let value = match self.scale {
            ParamScale::Linear => self.min + n * (self.max - self.min),
            ParamScale::Logarithmic => {
                if self.min <= 0.0 {
                    return self.min;
                }
                self.min * libm::powf(self.max / self.min, n)
            }
            ParamScale::Power(exp) => self.min + libm::powf(n, exp) * (self.max - self.min),
        };
        if self.flags.contains(ParamFlags::STEPPED) {
            self.clamp(value)
        } else {
            value.clamp(self.min, self.max)
        }
    }

    /// Label of a choice parameter for the given plain value.
    pub fn choice_label(&self, value: f32) -> Option<&'static str> {
        if self.choices.is_empty() {
            return None;
        }
        let index = self.clamp(value) - self.min;
        self.choices.get(libm::roundf(index) as usize).copied()
    }
}

/// Unit type for parameter display and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Decibels, for gain.
    Decibels,
    /// Hertz, for cutoff and center frequencies.
    Hertz,
    /// No unit (Q, choice indices).
    None,
}

impl ParamUnit {
    /// Unit suffix for display.
    ///
    /// ```rust
    /// use cascade_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Hertz.suffix(), " Hz");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Decibels => " dB",
            ParamUnit::Hertz => " Hz",
            ParamUnit::None => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SLOPES: &[&str] = &["12", "24", "36", "48"];

    struct TestBand {
        freq: f32,
        gain: f32,
        slope: f32,
    }

    impl TestBand {
        fn new() -> Self {
            Self {
                freq: 750.0,
                gain: 0.0,
                slope: 0.0,
            }
        }
    }

    impl ParameterInfo for TestBand {
        fn param_count(&self) -> usize {
            3
        }

        fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
            match index {
                0 => Some(
                    ParamDescriptor::frequency_hz("Band Freq", "Freq", 20.0, 20000.0, 750.0)
                        .with_id(ParamId(10), "band_freq"),
                ),
                1 => Some(
                    ParamDescriptor::gain_db("Band Gain", "Gain", -24.0, 24.0, 0.0)
                        .with_id(ParamId(11), "band_gain"),
                ),
                2 => Some(
                    ParamDescriptor::choice("Band Slope", "Slope", SLOPES, 0)
                        .with_id(ParamId(12), "band_slope"),
                ),
                _ => None,
            }
        }

        fn get_param(&self, index: usize) -> f32 {
            match index {
                0 => self.freq,
                1 => self.gain,
                2 => self.slope,
                _ => 0.0,
            }
        }

        fn set_param(&mut self, index: usize, value: f32) {
            let Some(desc) = self.param_info(index) else {
                return;
            };
            let value = desc.clamp(value);
            match index {
                0 => self.freq = value,
                1 => self.gain = value,
                2 => self.slope = value,
                _ => {}
            }
        }
    }

    #[test]
    fn test_find_by_name_and_id() {
        let band = TestBand::new();
        assert_eq!(band.find_param_by_name("band gain"), Some(1));
        assert_eq!(band.find_param_by_name("FREQ"), Some(0));
        assert_eq!(band.find_param_by_name("band_slope"), Some(2));
        assert_eq!(band.find_param_by_name("missing"), None);

        assert_eq!(band.param_id(2), Some(ParamId(12)));
        assert_eq!(band.param_index_by_id(ParamId(11)), Some(1));
        assert_eq!(band.param_index_by_id(ParamId(99)), None);
    }

    #[test]
    fn test_set_param_clamps() {
        let mut band = TestBand::new();
        band.set_param(0, 50000.0);
        assert_eq!(band.get_param(0), 20000.0);
        band.set_param(1, -100.0);
        assert_eq!(band.get_param(1), -24.0);
        band.set_param(2, 2.4);
        assert_eq!(band.get_param(2), 2.0);
        band.set_param(2, 9.0);
        assert_eq!(band.get_param(2), 3.0);

        band.set_param(99, 1.0);
        assert_eq!(band.get_param(99), 0.0);
    }

    #[test]
    fn test_power_scale_matches_skew() {
        let desc = ParamDescriptor::frequency_hz("F", "F", 20.0, 20000.0, 750.0);

        // Skew 0.25: the slider midpoint sits at min + range * 0.5^4.
        let mid = desc.denormalize(0.5);
        let expected = 20.0 + 19980.0 * 0.0625;
        assert!((mid - expected).abs() < 0.01, "got {mid}");

        for &val in &[20.0, 100.0, 750.0, 5000.0, 20000.0] {
            let rt = desc.denormalize(desc.normalize(val));
            assert!((rt - val).abs() / val < 1e-4, "round trip {val} -> {rt}");
        }
    }

    #[test]
    fn test_normalize_linear() {
        let desc = ParamDescriptor::gain_db("G", "G", -24.0, 24.0, 0.0);
        assert_eq!(desc.normalize(0.0), 0.5);
        assert_eq!(desc.denormalize(0.25), -12.0);
        assert_eq!(desc.denormalize(2.0), 24.0);
        assert_eq!(desc.denormalize(f32::NAN), -24.0);
    }

    #[test]
    fn test_normalize_logarithmic() {
        let desc = ParamDescriptor::frequency_hz("F", "F", 20.0, 20000.0, 1000.0)
            .with_scale(ParamScale::Logarithmic);
        let mid = desc.denormalize(0.5);
        let expected = libm::sqrtf(20.0 * 20000.0);
        assert!((mid - expected).abs() < 1.0);
    }

    #[test]
    fn test_choice_descriptor() {
        let desc = ParamDescriptor::choice("Slope", "Slope", SLOPES, 1);
        assert_eq!(desc.min, 0.0);
        assert_eq!(desc.max, 3.0);
        assert_eq!(desc.default, 1.0);
        assert_eq!(desc.step, 1.0);
        assert_eq!(desc.choice_label(0.0), Some("12"));
        assert_eq!(desc.choice_label(2.6), Some("48"));
        assert_eq!(desc.denormalize(0.5), 2.0);
        assert_eq!(desc.normalize(3.0), 1.0);

        let gain = ParamDescriptor::gain_db("G", "G", -24.0, 24.0, 0.0);
        assert_eq!(gain.choice_label(0.0), None);
    }

    #[test]
    fn test_flags() {
        assert_eq!(ParamFlags::default(), ParamFlags::AUTOMATABLE);
        let desc = ParamDescriptor::quality("Q", "Q", 0.1, 10.0, 1.0)
            .with_flags(ParamFlags::NONE)
            .with_group("peak1");
        assert!(!desc.flags.contains(ParamFlags::AUTOMATABLE));
        assert_eq!(desc.group, "peak1");
    }
}
