//! Playback clock - drives a TimeTranslator from a wall clock

use rewind_core::{Duration, RewindError, RewindResult, Time, TimeScale};
use tracing::{debug, warn};

use crate::{SystemClock, TimeTranslator, WallClock};

/// Playback configuration
#[derive(Clone, Debug)]
pub struct PlaybackConfig {
    /// Playback rate divisor (2.0 = twice as fast)
    pub rate: f64,
    /// Gap between `start` and the first record being due
    pub start_delay: Duration,
    /// Reject non-finite and non-positive rates instead of passing them through
    pub validate_rate: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        PlaybackConfig {
            rate: 1.0,
            start_delay: Duration::from_millis(200),
            validate_rate: true,
        }
    }
}

impl PlaybackConfig {
    /// Real-time playback with the default start delay
    pub fn realtime() -> Self {
        Self::default()
    }

    /// Accelerated (or, below 1.0, slowed) playback
    pub fn fast_forward(rate: f64) -> Self {
        PlaybackConfig {
            rate,
            ..Self::default()
        }
    }

    fn check_rate(&self, rate: f64) -> RewindResult<()> {
        match TimeScale::new(rate) {
            Ok(_) => Ok(()),
            Err(e) if self.validate_rate => Err(e),
            Err(_) => {
                warn!(rate, "degenerate playback rate accepted");
                Ok(())
            }
        }
    }
}

/// Where playback is
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    /// Not started; the translator still holds its defaults
    Idle,
    Playing,
    Paused,
}

/// Pause-aware playback clock
///
/// Anchors a [`TimeTranslator`] on a [`WallClock`] and keeps the translated
/// timeline continuous across pauses and rate changes:
/// - `start` pins the first record to "now" (plus the start delay)
/// - `resume` shifts the translated start by the time spent paused
/// - `set_rate` re-anchors at the record currently being presented
pub struct PlaybackClock<C: WallClock = SystemClock> {
    translator: TimeTranslator,
    clock: C,
    state: PlaybackState,
    /// Wall time of the current pause
    paused_at: Option<Time>,
    /// Accumulated pause time since `start`
    total_paused: Duration,
    config: PlaybackConfig,
}

impl PlaybackClock<SystemClock> {
    /// Create a playback clock on the system wall clock
    pub fn new() -> Self {
        PlaybackClock {
            translator: TimeTranslator::new(),
            clock: SystemClock,
            state: PlaybackState::Idle,
            paused_at: None,
            total_paused: Duration::ZERO,
            config: PlaybackConfig::default(),
        }
    }

    pub fn with_config(config: PlaybackConfig) -> RewindResult<Self> {
        Self::with_clock(SystemClock, config)
    }
}

impl Default for PlaybackClock<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: WallClock> PlaybackClock<C> {
    /// Create a playback clock on a custom wall clock
    pub fn with_clock(clock: C, config: PlaybackConfig) -> RewindResult<Self> {
        config.check_rate(config.rate)?;

        let mut translator = TimeTranslator::new();
        translator.set_time_scale(config.rate);

        Ok(PlaybackClock {
            translator,
            clock,
            state: PlaybackState::Idle,
            paused_at: None,
            total_paused: Duration::ZERO,
            config,
        })
    }

    /// Begin (or restart) playback of a series whose first record is at
    /// `first_record`.
    pub fn start(&mut self, first_record: Time) {
        let now = self.clock.now();
        self.translator.set_real_start_time(first_record);
        self.translator
            .set_translated_start_time(now + self.config.start_delay);
        self.state = PlaybackState::Playing;
        self.paused_at = None;
        self.total_paused = Duration::ZERO;

        debug!(
            first_record = %first_record,
            now = %now,
            rate = self.translator.time_scale(),
            "playback started"
        );
    }

    /// Freeze the presented position. Pausing twice is a no-op.
    pub fn pause(&mut self) -> RewindResult<()> {
        match self.state {
            PlaybackState::Idle => Err(RewindError::NotStarted),
            PlaybackState::Paused => Ok(()),
            PlaybackState::Playing => {
                let now = self.clock.now();
                self.paused_at = Some(now);
                self.state = PlaybackState::Paused;
                debug!(at = %now, "playback paused");
                Ok(())
            }
        }
    }

    /// Continue from where `pause` left off. Returns the time spent paused.
    pub fn resume(&mut self) -> RewindResult<Duration> {
        match (self.state, self.paused_at) {
            (PlaybackState::Idle, _) => Err(RewindError::NotStarted),
            (PlaybackState::Paused, Some(paused_at)) => {
                let paused = self.clock.now() - paused_at;
                self.translator.shift(paused);
                self.total_paused += paused;
                self.paused_at = None;
                self.state = PlaybackState::Playing;
                debug!(paused = %paused, "playback resumed");
                Ok(paused)
            }
            _ => Ok(Duration::ZERO),
        }
    }

    /// Pause if playing, resume if paused
    pub fn toggle(&mut self) -> RewindResult<()> {
        match self.state {
            PlaybackState::Paused => self.resume().map(|_| ()),
            _ => self.pause(),
        }
    }

    /// Change the playback rate without moving the presented position.
    ///
    /// Before `start` this only sets the rate.
    pub fn set_rate(&mut self, rate: f64) -> RewindResult<()> {
        self.config.check_rate(rate)?;

        if let Some(anchor) = self.reference_time() {
            let presented = self.translator.inverse(anchor);
            self.translator.set_real_start_time(presented);
            self.translator.set_translated_start_time(anchor);
            debug!(
                from = self.translator.time_scale(),
                to = rate,
                presented = %presented,
                "playback rate changed"
            );
        }
        self.translator.set_time_scale(rate);
        self.config.rate = rate;
        Ok(())
    }

    /// Wall time at which `record` should be presented
    #[inline]
    pub fn schedule(&self, record: Time) -> Time {
        self.translator.translate(record)
    }

    /// Signed time until `record` is due; negative means overdue.
    ///
    /// While paused this is measured from the pause, i.e. the wait that
    /// would remain if playback resumed right now.
    pub fn wait_time(&self, record: Time) -> RewindResult<Duration> {
        let reference = self.reference_time().ok_or(RewindError::NotStarted)?;
        Ok(self.schedule(record) - reference)
    }

    /// Recorded time being presented now (or at the pause)
    pub fn current_real_time(&self) -> RewindResult<Time> {
        self.reference_time()
            .map(|t| self.translator.inverse(t))
            .ok_or(RewindError::NotStarted)
    }

    /// Make `record` due immediately (at the pause instant while paused).
    ///
    /// Used to single-step through records while paused; the records after
    /// it keep their spacing.
    pub fn step(&mut self, record: Time) -> RewindResult<()> {
        let reference = self.reference_time().ok_or(RewindError::NotStarted)?;
        let offset = reference - self.translator.translate(record);
        self.translator.shift(offset);
        debug!(record = %record, offset = %offset, "stepped");
        Ok(())
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state == PlaybackState::Paused
    }

    pub fn translator(&self) -> &TimeTranslator {
        &self.translator
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Pause time accumulated since `start`, excluding a pause in progress
    pub fn total_paused(&self) -> Duration {
        self.total_paused
    }

    /// Wall instant the presented position is measured at
    fn reference_time(&self) -> Option<Time> {
        match self.state {
            PlaybackState::Idle => None,
            PlaybackState::Playing => Some(self.clock.now()),
            PlaybackState::Paused => self.paused_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ManualClock;

    fn wall_start() -> Time {
        Time::from_secs(1_000_000)
    }

    fn record_start() -> Time {
        Time::from_secs(500)
    }

    fn immediate(rate: f64) -> PlaybackConfig {
        PlaybackConfig {
            rate,
            start_delay: Duration::ZERO,
            validate_rate: true,
        }
    }

    fn started(rate: f64) -> (PlaybackClock<ManualClock>, ManualClock) {
        let wall = ManualClock::new(wall_start());
        let mut playback = PlaybackClock::with_clock(wall.clone(), immediate(rate)).unwrap();
        playback.start(record_start());
        (playback, wall)
    }

    #[test]
    fn test_start_anchors_first_record() {
        let (playback, _) = started(1.0);

        assert_eq!(playback.state(), PlaybackState::Playing);
        assert_eq!(playback.schedule(record_start()), wall_start());
        assert_eq!(
            playback.schedule(record_start() + Duration::from_secs(3)),
            wall_start() + Duration::from_secs(3)
        );
    }

    #[test]
    fn test_start_delay() {
        let wall = ManualClock::new(wall_start());
        let mut playback =
            PlaybackClock::with_clock(wall.clone(), PlaybackConfig::realtime()).unwrap();
        playback.start(record_start());

        assert_eq!(
            playback.schedule(record_start()),
            wall_start() + Duration::from_millis(200)
        );
        assert_eq!(playback.wait_time(record_start()), Ok(Duration::from_millis(200)));
    }

    #[test]
    fn test_pause_resume_has_no_discontinuity() {
        let (mut playback, wall) = started(2.0);
        let record = record_start() + Duration::from_secs(10);
        let due_before = playback.schedule(record);

        wall.advance(Duration::from_secs(1));
        playback.pause().unwrap();
        let remaining = playback.wait_time(record).unwrap();

        wall.advance(Duration::from_secs(30));
        assert_eq!(playback.wait_time(record), Ok(remaining));
        assert_eq!(playback.resume().unwrap(), Duration::from_secs(30));

        assert_eq!(playback.schedule(record), due_before + Duration::from_secs(30));
        assert_eq!(playback.wait_time(record), Ok(remaining));
        assert_eq!(playback.total_paused(), Duration::from_secs(30));
    }

    #[test]
    fn test_current_real_time_freezes_while_paused() {
        let (mut playback, wall) = started(1.0);

        wall.advance(Duration::from_secs(4));
        assert_eq!(
            playback.current_real_time().unwrap(),
            record_start() + Duration::from_secs(4)
        );

        playback.pause().unwrap();
        wall.advance(Duration::from_secs(60));
        assert_eq!(
            playback.current_real_time().unwrap(),
            record_start() + Duration::from_secs(4)
        );

        playback.resume().unwrap();
        wall.advance(Duration::from_secs(1));
        assert_eq!(
            playback.current_real_time().unwrap(),
            record_start() + Duration::from_secs(5)
        );
    }

    #[test]
    fn test_set_rate_keeps_position() {
        let (mut playback, wall) = started(1.0);

        wall.advance(Duration::from_secs(10));
        playback.set_rate(4.0).unwrap();
        assert_eq!(
            playback.current_real_time().unwrap(),
            record_start() + Duration::from_secs(10)
        );

        wall.advance(Duration::from_secs(1));
        assert_eq!(
            playback.current_real_time().unwrap(),
            record_start() + Duration::from_secs(14)
        );
        assert_eq!(playback.config().rate, 4.0);
    }

    #[test]
    fn test_set_rate_while_paused() {
        let (mut playback, wall) = started(1.0);

        wall.advance(Duration::from_secs(2));
        playback.pause().unwrap();
        wall.advance(Duration::from_secs(5));
        playback.set_rate(0.5).unwrap();
        playback.resume().unwrap();

        assert_eq!(
            playback.current_real_time().unwrap(),
            record_start() + Duration::from_secs(2)
        );
        wall.advance(Duration::from_secs(2));
        assert_eq!(
            playback.current_real_time().unwrap(),
            record_start() + Duration::from_secs(3)
        );
    }

    #[test]
    fn test_invalid_rate_rejected() {
        let (mut playback, _) = started(1.0);

        assert_eq!(playback.set_rate(0.0), Err(RewindError::InvalidTimeScale(0.0)));
        assert_eq!(playback.translator().time_scale(), 1.0);

        let result = PlaybackClock::with_clock(ManualClock::default(), immediate(-1.0));
        assert!(matches!(result, Err(RewindError::InvalidTimeScale(_))));
    }

    #[test]
    fn test_permissive_rate_passes_through() {
        let config = PlaybackConfig {
            validate_rate: false,
            ..immediate(1.0)
        };
        let mut playback = PlaybackClock::with_clock(ManualClock::default(), config).unwrap();

        playback.set_rate(-1.0).unwrap();
        assert_eq!(playback.translator().time_scale(), -1.0);
    }

    #[test]
    fn test_requires_start() {
        let mut playback =
            PlaybackClock::with_clock(ManualClock::default(), immediate(1.0)).unwrap();

        assert_eq!(playback.state(), PlaybackState::Idle);
        assert_eq!(playback.pause(), Err(RewindError::NotStarted));
        assert_eq!(playback.resume(), Err(RewindError::NotStarted));
        assert_eq!(playback.current_real_time(), Err(RewindError::NotStarted));
        assert_eq!(playback.wait_time(Time::from_secs(1)), Err(RewindError::NotStarted));
        assert_eq!(playback.step(Time::from_secs(1)), Err(RewindError::NotStarted));

        // Rate still applies once started
        playback.set_rate(2.0).unwrap();
        assert_eq!(playback.translator().time_scale(), 2.0);
    }

    #[test]
    fn test_step_while_paused() {
        let (mut playback, wall) = started(1.0);
        let next = record_start() + Duration::from_secs(20);
        let after = next + Duration::from_secs(1);

        wall.advance(Duration::from_secs(1));
        playback.pause().unwrap();
        playback.step(next).unwrap();

        assert_eq!(playback.wait_time(next), Ok(Duration::ZERO));
        assert_eq!(playback.wait_time(after), Ok(Duration::from_secs(1)));
        assert_eq!(playback.current_real_time().unwrap(), next);
    }

    #[test]
    fn test_toggle() {
        let (mut playback, wall) = started(1.0);

        playback.toggle().unwrap();
        assert!(playback.is_paused());
        wall.advance(Duration::from_secs(3));
        playback.toggle().unwrap();
        assert_eq!(playback.state(), PlaybackState::Playing);
        assert_eq!(playback.total_paused(), Duration::from_secs(3));
    }

    #[test]
    fn test_restart_clears_pause_state() {
        let (mut playback, wall) = started(1.0);

        playback.pause().unwrap();
        wall.advance(Duration::from_secs(3));
        playback.start(record_start());

        assert_eq!(playback.state(), PlaybackState::Playing);
        assert_eq!(playback.total_paused(), Duration::ZERO);
        assert_eq!(playback.schedule(record_start()), wall.now());
    }
}
