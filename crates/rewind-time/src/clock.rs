//! Wall clock sources for playback

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;
use rewind_core::{Duration, Time};

/// Source of the translated series' "now"
///
/// Playback anchors the translated timeline on this clock, so it must
/// share an epoch with whatever consumes the translated timestamps.
pub trait WallClock {
    /// Get the current time according to this clock
    fn now(&self) -> Time;
}

impl<C: WallClock + ?Sized> WallClock for &C {
    fn now(&self) -> Time {
        (**self).now()
    }
}

impl<C: WallClock + ?Sized> WallClock for Arc<C> {
    fn now(&self) -> Time {
        (**self).now()
    }
}

/// System wall clock, nanoseconds since the Unix epoch
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now(&self) -> Time {
        // A clock set before 1970 reads as zero
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Time::from_nanos(u64::try_from(since_epoch.as_nanos()).unwrap_or(u64::MAX))
    }
}

/// Manually driven clock for deterministic playback
///
/// Clones share the same underlying time, so a test can keep one handle
/// and hand another to a [`crate::PlaybackClock`].
#[derive(Clone, Debug)]
pub struct ManualClock {
    value: Arc<Mutex<Time>>,
}

impl ManualClock {
    pub fn new(start: Time) -> Self {
        ManualClock {
            value: Arc::new(Mutex::new(start)),
        }
    }

    pub fn set(&self, t: Time) {
        *self.value.lock() = t;
    }

    /// Move the clock by `d` (may be negative) and return the new time
    pub fn advance(&self, d: Duration) -> Time {
        let mut value = self.value.lock();
        *value += d;
        *value
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Time::MIN)
    }
}

impl WallClock for ManualClock {
    fn now(&self) -> Time {
        *self.value.lock()
    }
}
