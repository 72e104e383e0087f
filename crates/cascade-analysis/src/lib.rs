//! Cascade Analysis - measured frequency response for cascade-eq
//!
//! Offline tools for checking what the filter chains actually do, as opposed
//! to what their coefficients say they should do:
//!
//! - [`fft`] - FFT wrapper with windowing functions
//! - [`response`] - impulse-response capture and FFT magnitude response
//!
//! ## Example
//!
//! ```rust
//! use cascade_analysis::{FrequencyResponse, capture_impulse_response};
//! use cascade_core::{FilterStage, StageKind, peak_coefficients};
//!
//! let mut stage = FilterStage::new(StageKind::Peak);
//! stage.set_coefficients(peak_coefficients(48000.0, 1000.0, 1.0, 6.0));
//!
//! let ir = capture_impulse_response(&mut stage, 8192);
//! let response = FrequencyResponse::from_impulse(&ir, 48000.0);
//! assert!((response.magnitude_db_at(1000.0) - 6.0).abs() < 0.1);
//! ```

pub mod fft;
pub mod response;

pub use fft::{Fft, Window};
pub use response::{
    FrequencyResponse, capture_impulse_response, log_spaced_frequencies, unit_impulse,
};
