//! rewind Test Harness - Playback simulation
//!
//! This crate provides:
//! - Synthetic recorded logs (uniform and jittered)
//! - Scripted pause, resume, rate and step events
//! - Replay simulation on a manual wall clock with continuity reporting

pub mod recording;
pub mod replay_simulator;

pub use recording::*;
pub use replay_simulator::*;
