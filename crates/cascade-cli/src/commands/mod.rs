//! CLI command implementations.

pub mod common;
pub mod dump;
pub mod impulse;
pub mod params;
pub mod response;
