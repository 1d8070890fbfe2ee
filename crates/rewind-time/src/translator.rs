//! Translation between the real and translated time series

use rewind_core::{Duration, Time};

/// Maps times from a series starting at `real_start` onto a comparable
/// series starting at `translated_start`.
///
/// Every elapsed span is scaled by `1 / time_scale`, so a series replayed
/// with a time scale of 2 finishes twice as quickly.
///
/// The setters do not validate anything. A zero or negative time scale
/// gives degenerate or inverted output from [`TimeTranslator::translate`];
/// see [`rewind_core::TimeScale`] for a checked rate.
///
/// The translated start is held as signed nanoseconds so that shifts may
/// carry it below the epoch and back without losing anything. Only the
/// results of `translate` and `inverse` are clamped to the `Time` range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeTranslator {
    /// Playback rate divisor (1.0 = real-time)
    time_scale: f64,
    /// Real time corresponding to `translated_start`
    real_start: Time,
    /// Translated time corresponding to `real_start`, in signed nanoseconds
    translated_start: i128,
}

/// `span * factor`, rounded to the nearest nanosecond. Exact for 1.0.
#[inline]
fn scale_span(span: i128, factor: f64) -> i128 {
    if factor == 1.0 {
        span
    } else {
        // NaN maps to 0, infinities saturate
        (span as f64 * factor).round() as i128
    }
}

#[inline]
fn clamp_time(nanos: i128) -> Time {
    Time(nanos.clamp(0, u64::MAX as i128) as u64)
}

impl TimeTranslator {
    /// Create a translator at real-time rate, anchored at [`Time::MIN`]
    pub fn new() -> Self {
        TimeTranslator {
            time_scale: 1.0,
            real_start: Time::MIN,
            translated_start: Time::MIN.as_nanos() as i128,
        }
    }

    pub fn set_time_scale(&mut self, scale: f64) {
        self.time_scale = scale;
    }

    pub fn set_real_start_time(&mut self, t: Time) {
        self.real_start = t;
    }

    /// Anchor the translated series at `t`
    pub fn set_translated_start_time(&mut self, t: Time) {
        self.translated_start = t.as_nanos() as i128;
    }

    /// Move the translated start time by `d`. Used to absorb a pause.
    pub fn shift(&mut self, d: Duration) {
        self.translated_start = self.translated_start.saturating_add(d.as_nanos() as i128);
    }

    /// Map a real time onto the translated series.
    ///
    /// `translated_start + (t - real_start) * (1 / time_scale)`. The reciprocal
    /// is taken before the multiply, which is not always bit-identical to
    /// dividing by the scale.
    #[inline]
    pub fn translate(&self, t: Time) -> Time {
        let span = t.as_nanos() as i128 - self.real_start.as_nanos() as i128;
        clamp_time(self.translated_start.saturating_add(scale_span(span, 1.0 / self.time_scale)))
    }

    /// Map a translated time back onto the real series.
    #[inline]
    pub fn inverse(&self, t: Time) -> Time {
        let span = (t.as_nanos() as i128).saturating_sub(self.translated_start);
        clamp_time((self.real_start.as_nanos() as i128).saturating_add(scale_span(span, self.time_scale)))
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn real_start_time(&self) -> Time {
        self.real_start
    }

    /// Clamped to the `Time` range; a shift may have carried it past either end.
    pub fn translated_start_time(&self) -> Time {
        clamp_time(self.translated_start)
    }
}

impl Default for TimeTranslator {
    fn default() -> Self {
        Self::new()
    }
}
