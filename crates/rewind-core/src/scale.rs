//! Validated playback rate

use crate::{RewindError, RewindResult};

/// Playback rate divisor: 2.0 plays twice as fast, 0.5 at half speed.
///
/// The translator accepts any `f64`; this type is for callers that want to
/// reject degenerate rates before they reach it.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct TimeScale(f64);

impl TimeScale {
    pub const REALTIME: TimeScale = TimeScale(1.0);

    /// Accepts only finite values strictly greater than zero.
    pub fn new(scale: f64) -> RewindResult<Self> {
        if scale.is_finite() && scale > 0.0 {
            Ok(TimeScale(scale))
        } else {
            Err(RewindError::InvalidTimeScale(scale))
        }
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }

    /// Factor applied to elapsed real time
    #[inline]
    pub fn reciprocal(self) -> f64 {
        1.0 / self.0
    }
}

impl Default for TimeScale {
    fn default() -> Self {
        TimeScale::REALTIME
    }
}

impl TryFrom<f64> for TimeScale {
    type Error = RewindError;

    fn try_from(scale: f64) -> RewindResult<Self> {
        TimeScale::new(scale)
    }
}

impl From<TimeScale> for f64 {
    fn from(scale: TimeScale) -> f64 {
        scale.0
    }
}
