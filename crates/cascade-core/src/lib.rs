//! Cascade Core - filter primitives for a real-time multiband equalizer
//!
//! This crate holds everything that runs on the audio thread below the
//! parameter store: biquad sections, the coefficient calculator, filter
//! stages and the fixed 12-slot channel chain. Nothing here allocates.
//!
//! # Core Abstractions
//!
//! ## Filters
//!
//! - [`BiquadCoefficients`] - normalized `(b0, b1, b2, a1, a2)` set with
//!   stability checks and analytic magnitude evaluation
//! - [`Biquad`] - transposed direct form II section
//! - [`FilterStage`] - one biquad with a bypass flag and a [`StageKind`]
//! - [`FilterChain`] - low-cut cascade, four peaks, high-cut cascade
//!
//! ## Coefficient Calculator
//!
//! - [`peak_coefficients`] - RBJ peaking EQ from frequency, Q and gain in dB
//! - [`cut_cascade`] - even-order Butterworth high/low-pass as a [`CutCascade`]
//!
//! ## Parameters
//!
//! - [`ParameterInfo`], [`ParamDescriptor`], [`ParamScale`], [`ParamId`]
//!
//! # no_std Support
//!
//! Disable the default `std` feature to build for embedded targets:
//!
//! ```toml
//! [dependencies]
//! cascade-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use cascade_core::{Effect, FilterChain, peak_coefficients};
//!
//! let mut chain = FilterChain::new();
//! chain.peaks_mut()[0].set_coefficients(peak_coefficients(48000.0, 1000.0, 1.0, 6.0));
//!
//! let mut buffer = [0.25f32; 128];
//! chain.process_block_inplace(&mut buffer);
//! assert!(buffer.iter().all(|s| s.is_finite()));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod biquad;
pub mod chain;
pub mod coefficients;
pub mod effect;
pub mod math;
pub mod param_info;
pub mod stage;

pub use biquad::{
    Biquad, BiquadCoefficients, highpass_coefficients, lowpass_coefficients,
    peaking_eq_coefficients,
};
pub use chain::{CHAIN_LEN, CUT_SLOTS, ChainPosition, FilterChain, PEAK_BANDS};
pub use coefficients::{
    CutCascade, CutKind, MAX_CUT_ORDER, MAX_CUT_SECTIONS, MAX_SAMPLE_RATE, MIN_SAMPLE_RATE,
    butterworth_q, clamp_frequency, cut_cascade, peak_coefficients,
};
pub use effect::Effect;
pub use math::{db_to_linear, flush_denormal, linear_to_db};
pub use param_info::{ParamDescriptor, ParamFlags, ParamId, ParamScale, ParamUnit, ParameterInfo};
pub use stage::{FilterStage, StageKind};
