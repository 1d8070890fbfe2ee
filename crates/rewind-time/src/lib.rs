//! rewind time - Mapping recorded timestamps onto playback time
//!
//! This crate implements:
//! - TimeTranslator: affine map from real (recorded) time to translated time
//! - Wall clock sources (system and manual)
//! - PlaybackClock: start, pause, resume and rate changes without jumps

pub mod translator;
pub mod clock;
pub mod playback;

pub use translator::*;
pub use clock::*;
pub use playback::*;
