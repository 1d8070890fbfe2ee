//! rewind core - Fundamental time types
//!
//! This crate defines the types shared by the rest of the workspace:
//! - Time primitives (Time, Duration)
//! - Validated playback rate (TimeScale)
//! - Error and result types

pub mod time;
pub mod scale;
pub mod error;

pub use time::*;
pub use scale::*;
pub use error::*;
