//! Time primitives for rewind
//!
//! Two series of timestamps meet during playback:
//! - real time: the instants stamped on recorded data
//! - translated time: the wall-clock instants at which that data is presented
//!
//! Both are expressed with [`Time`]. Elapsed spans between them are [`Duration`],
//! which is signed so that shifts and differences can run backwards.

use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use crate::{RewindError, RewindResult};

const NANOS_PER_SEC: u64 = 1_000_000_000;
const NANOS_PER_SEC_F64: f64 = 1_000_000_000.0;

/// Absolute point in time, in nanoseconds since the epoch.
///
/// Arithmetic saturates at [`Time::ZERO`] and [`Time::MAX`] instead of
/// panicking. Use [`Time::checked_add`] and [`Time::checked_sub`] when the
/// caller needs to know.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Time(pub u64);

impl Time {
    pub const ZERO: Time = Time(0);
    /// Smallest valid time. Zero is reserved to mean "unset".
    pub const MIN: Time = Time(1);
    pub const MAX: Time = Time(u64::MAX);

    #[inline]
    pub const fn new(secs: u64, nanos: u32) -> Self {
        Time(secs.saturating_mul(NANOS_PER_SEC).saturating_add(nanos as u64))
    }

    #[inline]
    pub const fn from_nanos(nanos: u64) -> Self {
        Time(nanos)
    }

    #[inline]
    pub const fn from_micros(micros: u64) -> Self {
        Time(micros.saturating_mul(1_000))
    }

    #[inline]
    pub const fn from_millis(millis: u64) -> Self {
        Time(millis.saturating_mul(1_000_000))
    }

    #[inline]
    pub const fn from_secs(secs: u64) -> Self {
        Time(secs.saturating_mul(NANOS_PER_SEC))
    }

    /// Negative and NaN inputs map to [`Time::ZERO`].
    #[inline]
    pub fn from_secs_f64(secs: f64) -> Self {
        Time((secs * NANOS_PER_SEC_F64).round() as u64)
    }

    #[inline]
    pub const fn as_nanos(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / NANOS_PER_SEC_F64
    }

    /// Whole seconds
    #[inline]
    pub const fn secs(self) -> u64 {
        self.0 / NANOS_PER_SEC
    }

    #[inline]
    pub const fn subsec_nanos(self) -> u32 {
        (self.0 % NANOS_PER_SEC) as u32
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn checked_add(self, d: Duration) -> Option<Time> {
        let v = self.0 as i128 + d.0 as i128;
        if (0..=u64::MAX as i128).contains(&v) {
            Some(Time(v as u64))
        } else {
            None
        }
    }

    #[inline]
    pub fn checked_sub(self, d: Duration) -> Option<Time> {
        let v = self.0 as i128 - d.0 as i128;
        if (0..=u64::MAX as i128).contains(&v) {
            Some(Time(v as u64))
        } else {
            None
        }
    }

    #[inline]
    pub fn saturating_add(self, d: Duration) -> Self {
        let v = self.0 as i128 + d.0 as i128;
        Time(v.clamp(0, u64::MAX as i128) as u64)
    }

    #[inline]
    pub fn saturating_sub(self, d: Duration) -> Self {
        let v = self.0 as i128 - d.0 as i128;
        Time(v.clamp(0, u64::MAX as i128) as u64)
    }

    /// Signed span from `earlier` to `self`, or `None` if it does not fit
    /// in a [`Duration`].
    #[inline]
    pub fn checked_duration_since(self, earlier: Time) -> Option<Duration> {
        let diff = self.0 as i128 - earlier.0 as i128;
        i64::try_from(diff).ok().map(Duration)
    }

    /// Like [`Time::checked_duration_since`] but reports overflow as an error.
    pub fn duration_since(self, earlier: Time) -> RewindResult<Duration> {
        self.checked_duration_since(earlier)
            .ok_or(RewindError::TimeOverflow)
    }
}

impl Add<Duration> for Time {
    type Output = Time;

    #[inline]
    fn add(self, rhs: Duration) -> Self::Output {
        self.saturating_add(rhs)
    }
}

impl AddAssign<Duration> for Time {
    #[inline]
    fn add_assign(&mut self, rhs: Duration) {
        *self = *self + rhs;
    }
}

impl Sub<Duration> for Time {
    type Output = Time;

    #[inline]
    fn sub(self, rhs: Duration) -> Self::Output {
        self.saturating_sub(rhs)
    }
}

impl SubAssign<Duration> for Time {
    #[inline]
    fn sub_assign(&mut self, rhs: Duration) {
        *self = *self - rhs;
    }
}

impl Sub<Time> for Time {
    type Output = Duration;

    /// Saturates at the [`Duration`] bounds (about ±292 years).
    #[inline]
    fn sub(self, rhs: Time) -> Self::Output {
        let diff = self.0 as i128 - rhs.0 as i128;
        Duration(diff.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }
}

impl fmt::Debug for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Time({}.{:09})", self.secs(), self.subsec_nanos())
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}", self.secs(), self.subsec_nanos())
    }
}

/// Signed elapsed time, in nanoseconds.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duration(pub i64);

impl Duration {
    pub const ZERO: Duration = Duration(0);
    pub const MAX: Duration = Duration(i64::MAX);
    pub const MIN: Duration = Duration(i64::MIN);

    #[inline]
    pub const fn from_nanos(nanos: i64) -> Self {
        Duration(nanos)
    }

    #[inline]
    pub const fn from_micros(micros: i64) -> Self {
        Duration(micros.saturating_mul(1_000))
    }

    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        Duration(millis.saturating_mul(1_000_000))
    }

    #[inline]
    pub const fn from_secs(secs: i64) -> Self {
        Duration(secs.saturating_mul(NANOS_PER_SEC as i64))
    }

    #[inline]
    pub fn from_secs_f64(secs: f64) -> Self {
        Duration((secs * NANOS_PER_SEC_F64).round() as i64)
    }

    /// Saturates at [`Duration::MAX`].
    #[inline]
    pub fn from_std(d: std::time::Duration) -> Self {
        Duration(i64::try_from(d.as_nanos()).unwrap_or(i64::MAX))
    }

    pub fn try_to_std(self) -> RewindResult<std::time::Duration> {
        if self.0 < 0 {
            return Err(RewindError::NegativeDuration(self.0));
        }
        Ok(std::time::Duration::from_nanos(self.0 as u64))
    }

    #[inline]
    pub const fn as_nanos(self) -> i64 {
        self.0
    }

    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / NANOS_PER_SEC_F64
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub const fn abs(self) -> Self {
        Duration(self.0.saturating_abs())
    }

    /// Scale by a real factor, rounding to the nearest nanosecond.
    ///
    /// A scale of exactly 1.0 returns `self` unchanged. Otherwise the product
    /// is taken in `f64`, which is exact for spans up to about 104 days at
    /// nanosecond resolution. Half-way values round away from zero. Results
    /// outside the representable range saturate and a NaN product (e.g. zero
    /// times infinity) yields [`Duration::ZERO`].
    #[inline]
    pub fn mul_f64(self, scale: f64) -> Self {
        if scale == 1.0 {
            return self;
        }
        Duration((self.0 as f64 * scale).round() as i64)
    }
}

impl Add for Duration {
    type Output = Duration;

    #[inline]
    fn add(self, rhs: Duration) -> Self::Output {
        Duration(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Duration {
    #[inline]
    fn add_assign(&mut self, rhs: Duration) {
        *self = *self + rhs;
    }
}

impl Sub for Duration {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: Duration) -> Self::Output {
        Duration(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Duration {
    #[inline]
    fn sub_assign(&mut self, rhs: Duration) {
        *self = *self - rhs;
    }
}

impl Neg for Duration {
    type Output = Duration;

    #[inline]
    fn neg(self) -> Self::Output {
        Duration(self.0.saturating_neg())
    }
}

impl From<std::time::Duration> for Duration {
    fn from(d: std::time::Duration) -> Self {
        Duration::from_std(d)
    }
}

impl fmt::Debug for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Duration({})", self)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(
            f,
            "{}{}.{:09}s",
            sign,
            abs / NANOS_PER_SEC,
            abs % NANOS_PER_SEC
        )
    }
}
