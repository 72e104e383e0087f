//! Error types for EQ setup and parameter access.
//!
//! None of these are produced on the audio path: processing itself is total
//! and only [`prepare`](crate::StereoEq::prepare) and the name/value based
//! parameter setters can fail.

use thiserror::Error;

/// Errors that can occur while configuring the equalizer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EqError {
    /// Sample rate is not finite or outside the supported range
    #[error("invalid sample rate: {0} Hz")]
    InvalidSampleRate(f32),

    /// Maximum block size is zero
    #[error("invalid maximum block size: {0}")]
    InvalidBlockSize(usize),

    /// No parameter matches the given name, short name or string ID
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    /// Slope is not one of 12, 24, 36 or 48 dB/octave
    #[error("invalid slope: {0} dB/oct (expected 12, 24, 36 or 48)")]
    InvalidSlope(u32),
}

/// Convenience alias for EQ results.
pub type Result<T> = core::result::Result<T, EqError>;
