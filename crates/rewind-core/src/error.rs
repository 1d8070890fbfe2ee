//! Error types for rewind

use thiserror::Error;

/// Playback errors
///
/// The translator itself never fails; these come from the layers that
/// validate caller input or track playback state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RewindError {
    #[error("Invalid time scale: {0} (must be finite and > 0)")]
    InvalidTimeScale(f64),

    #[error("Playback not started")]
    NotStarted,

    #[error("Time overflow")]
    TimeOverflow,

    #[error("Negative duration: {0}ns")]
    NegativeDuration(i64),
}

/// Result type for rewind operations
pub type RewindResult<T> = Result<T, RewindError>;
