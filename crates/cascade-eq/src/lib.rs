//! Cascade EQ - real-time stereo multiband equalizer
//!
//! A two-channel equalizer with a Butterworth low cut, four peak bands and a
//! Butterworth high cut per channel, controlled through a lock-free
//! parameter store.
//!
//! # Architecture
//!
//! ```text
//! control threads ──set()──▶ SharedParams (16 × AtomicU32)
//!                                 │ snapshot() once per block
//!                                 ▼
//!                           ParamSnapshot
//!                                 │ ChainCoefficients::from_snapshot
//!                                 ▼
//!                      update controller (apply)
//!                         │                 │
//!                         ▼                 ▼
//!                  left FilterChain   right FilterChain
//! ```
//!
//! - [`SharedParams`] - one atomic cell per parameter, written by any thread
//! - [`ParamSnapshot`] - the settings for one block
//! - [`ChainCoefficients`] - every coefficient set a block needs
//! - [`StereoEq`] - `prepare` / `process` entry points for a host
//! - [`layout`] - parameter descriptors, IDs and indices
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use cascade_eq::{SharedParams, StereoEq, layout};
//!
//! let params = Arc::new(SharedParams::new());
//! let mut eq = StereoEq::new(Arc::clone(&params));
//! eq.prepare(48000.0, 256)?;
//!
//! params.set_by_name("LowCut Freq", 80.0)?;
//! params.set(layout::LOW_CUT_SLOPE, 1.0); // 24 dB/oct
//!
//! let mut left = [0.0f32; 256];
//! let mut right = [0.0f32; 256];
//! eq.process(&mut left, &mut right, 256);
//! # Ok::<(), cascade_eq::EqError>(())
//! ```
//!
//! # Features
//!
//! - `serde` - `Serialize`/`Deserialize` for [`ParamSnapshot`], [`PeakBand`]
//!   and [`Slope`]
//! - `tracing` - debug events on setup paths (never per sample)

pub mod error;
pub mod layout;
pub mod processor;
pub mod shared;
pub mod snapshot;
pub mod update;

pub use error::{EqError, Result};
pub use layout::PARAM_COUNT;
pub use processor::{ProcessSpec, StereoEq};
pub use shared::SharedParams;
pub use snapshot::{PEAK_BAND_COUNT, ParamSnapshot, PeakBand, Slope};
pub use update::{ChainCoefficients, CutSettings, update_cut_filter};
