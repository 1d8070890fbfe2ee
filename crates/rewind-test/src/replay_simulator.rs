//! Replay Simulator - deterministic playback of a recorded log
//!
//! Simulates:
//! - A wall clock advancing in fixed ticks
//! - Records emitted as soon as their translated time comes due
//! - Scripted pauses, resumes, rate changes and single steps
//!
//! Lateness is measured against the schedule in force at emission, so a
//! pause that was not absorbed by the translator shows up as late records.

use rewind_core::{Duration, RewindResult, Time};
use rewind_time::{ManualClock, PlaybackClock, PlaybackConfig, WallClock};
use tracing::debug;

use crate::RecordedLog;

/// Playback control applied at a scripted wall offset
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlaybackEvent {
    Pause,
    Resume,
    SetRate(f64),
    /// Emit the next record immediately (only while paused)
    Step,
}

/// Event scheduled relative to the start of the simulation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduledEvent {
    pub at: Duration,
    pub event: PlaybackEvent,
}

/// Simulator configuration
#[derive(Clone, Debug)]
pub struct SimulatorConfig {
    /// Wall clock resolution
    pub tick: Duration,
    /// Give up after this much wall time
    pub max_wall_time: Duration,
    /// Playback settings
    pub playback: PlaybackConfig,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        SimulatorConfig {
            tick: Duration::from_millis(1),
            max_wall_time: Duration::from_secs(3_600),
            playback: PlaybackConfig {
                start_delay: Duration::ZERO,
                ..PlaybackConfig::default()
            },
        }
    }
}

/// One record handed to the consumer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Emission {
    /// Recorded timestamp
    pub record: Time,
    /// Wall time it was emitted
    pub emitted_at: Time,
    /// Emission minus schedule; always within one tick unless stepped
    pub lateness: Duration,
    /// Emitted by a `Step` event rather than by the schedule
    pub stepped: bool,
}

/// Replay outcome
#[derive(Clone, Debug, Default)]
pub struct ReplayReport {
    pub emissions: Vec<Emission>,
    /// Pause time absorbed by the translator
    pub total_paused: Duration,
    /// Records left when `max_wall_time` ran out
    pub unemitted: usize,
}

impl ReplayReport {
    pub fn emitted(&self) -> usize {
        self.emissions.len()
    }

    /// Worst lateness among scheduled (non-stepped) emissions
    pub fn max_lateness(&self) -> Duration {
        self.emissions
            .iter()
            .filter(|e| !e.stepped)
            .map(|e| e.lateness)
            .max()
            .unwrap_or(Duration::ZERO)
    }

    /// Wall time from first to last emission
    pub fn wall_span(&self) -> Duration {
        match (self.emissions.first(), self.emissions.last()) {
            (Some(first), Some(last)) => last.emitted_at - first.emitted_at,
            _ => Duration::ZERO,
        }
    }

    /// Whether any emission fell strictly inside `(from, to)`
    pub fn emitted_between(&self, from: Time, to: Time) -> bool {
        self.emissions
            .iter()
            .any(|e| e.emitted_at > from && e.emitted_at < to)
    }
}

/// Replay simulation on a manual wall clock
pub struct ReplaySimulator {
    wall: ManualClock,
    playback: PlaybackClock<ManualClock>,
    events: Vec<ScheduledEvent>,
    config: SimulatorConfig,
}

impl ReplaySimulator {
    /// Create a simulator whose wall clock starts at `wall_start`
    pub fn new(wall_start: Time, config: SimulatorConfig) -> RewindResult<Self> {
        let wall = ManualClock::new(wall_start);
        let playback = PlaybackClock::with_clock(wall.clone(), config.playback.clone())?;
        Ok(ReplaySimulator {
            wall,
            playback,
            events: Vec::new(),
            config,
        })
    }

    /// Script `event` at `at` wall time after the run starts
    pub fn at(&mut self, at: Duration, event: PlaybackEvent) -> &mut Self {
        self.events.push(ScheduledEvent { at, event });
        self
    }

    pub fn wall(&self) -> &ManualClock {
        &self.wall
    }

    pub fn playback(&self) -> &PlaybackClock<ManualClock> {
        &self.playback
    }

    /// Replay `log` from its first record until every record is emitted or
    /// `max_wall_time` runs out.
    pub fn run(&mut self, log: &RecordedLog) -> RewindResult<ReplayReport> {
        let mut report = ReplayReport::default();
        let first = match log.first() {
            Some(first) => first,
            None => return Ok(report),
        };

        let mut events = self.events.clone();
        events.sort_by_key(|e| e.at);
        let mut events = events.into_iter().peekable();

        let records = log.records();
        let started_at = self.wall.now();
        let mut next = 0;
        self.playback.start(first);

        while next < records.len() {
            let now = self.wall.now();
            let elapsed = now - started_at;
            if elapsed > self.config.max_wall_time {
                break;
            }

            while let Some(scheduled) = events.next_if(|e| e.at <= elapsed) {
                match scheduled.event {
                    PlaybackEvent::Pause => self.playback.pause()?,
                    PlaybackEvent::Resume => {
                        self.playback.resume()?;
                    }
                    PlaybackEvent::SetRate(rate) => self.playback.set_rate(rate)?,
                    PlaybackEvent::Step => {
                        if self.playback.is_paused() && next < records.len() {
                            let record = records[next];
                            self.playback.step(record)?;
                            report.emissions.push(Emission {
                                record,
                                emitted_at: now,
                                lateness: now - self.playback.schedule(record),
                                stepped: true,
                            });
                            next += 1;
                        }
                    }
                }
            }

            if !self.playback.is_paused() {
                while next < records.len() && self.playback.wait_time(records[next])? <= Duration::ZERO {
                    let record = records[next];
                    report.emissions.push(Emission {
                        record,
                        emitted_at: now,
                        lateness: now - self.playback.schedule(record),
                        stepped: false,
                    });
                    next += 1;
                }
            }

            self.wall.advance(self.config.tick);
        }

        report.total_paused = self.playback.total_paused();
        report.unemitted = records.len() - next;
        debug!(
            emitted = report.emitted(),
            unemitted = report.unemitted,
            paused = %report.total_paused,
            "replay finished"
        );
        Ok(report)
    }
}
