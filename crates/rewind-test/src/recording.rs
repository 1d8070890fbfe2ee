//! Synthetic recorded logs

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rewind_core::{Duration, Time};

/// Timestamps of a recorded series, kept in ascending order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordedLog {
    records: Vec<Time>,
}

impl RecordedLog {
    pub fn new(mut records: Vec<Time>) -> Self {
        records.sort_unstable();
        RecordedLog { records }
    }

    /// `count` records spaced exactly `interval` apart
    pub fn uniform(start: Time, interval: Duration, count: usize) -> Self {
        let records = (0..count)
            .map(|i| start + Duration::from_nanos(interval.as_nanos().saturating_mul(i as i64)))
            .collect();
        RecordedLog { records }
    }

    /// Like [`RecordedLog::uniform`] with each record displaced by up to
    /// `jitter` either way. The same seed always yields the same log.
    pub fn jittered(
        start: Time,
        interval: Duration,
        jitter: Duration,
        count: usize,
        seed: u64,
    ) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let spread = jitter.abs().as_nanos();
        let records = Self::uniform(start, interval, count)
            .records
            .into_iter()
            .map(|t| {
                let offset = if spread > 0 {
                    rng.gen_range(-spread..=spread)
                } else {
                    0
                };
                t + Duration::from_nanos(offset)
            })
            .collect();
        Self::new(records)
    }

    pub fn first(&self) -> Option<Time> {
        self.records.first().copied()
    }

    pub fn last(&self) -> Option<Time> {
        self.records.last().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Recorded time from first to last record
    pub fn span(&self) -> Duration {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => last - first,
            _ => Duration::ZERO,
        }
    }

    pub fn records(&self) -> &[Time] {
        &self.records
    }
}
