use std::time::{Duration, Instant};

/// Clock increment applied on every tick.
pub const DEFAULT_STEP: f32 = 0.01;

/// Tick period, roughly 60 Hz.
pub const TICK_PERIOD: Duration = Duration::from_millis(16);

// ---------------------------------------------------------------------------
// FrameClock
// ---------------------------------------------------------------------------

/// Shared animation time. Advanced by exactly one driver, read by every kernel.
///
/// The value is derived from the tick count instead of being accumulated, so
/// after `n` ticks it is always `initial + step * n` regardless of how the
/// ticks were spread over wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    initial: f32,
    step: f32,
    ticks: u64,
}

impl FrameClock {
    pub fn new(initial: f32) -> Self {
        Self::with_step(initial, DEFAULT_STEP)
    }

    pub fn with_step(initial: f32, step: f32) -> Self {
        Self {
            initial: initial.max(0.0),
            step: step.max(0.0),
            ticks: 0,
        }
    }

    pub fn now(&self) -> f32 {
        self.initial + self.step * self.ticks as f32
    }

    pub fn tick(&mut self) -> f32 {
        self.ticks += 1;
        self.now()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn initial(&self) -> f32 {
        self.initial
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(0.0)
    }
}

// ---------------------------------------------------------------------------
// Cadence: decides when the next tick is due
// ---------------------------------------------------------------------------

/// Fixed-period tick scheduler. A late poll yields a single tick; periods that
/// elapsed while nobody polled are dropped rather than replayed.
#[derive(Debug, Clone)]
pub struct Cadence {
    period: Duration,
    next_due: Instant,
}

impl Cadence {
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next_due: now + period,
        }
    }

    /// Returns `true` if a tick is due at `now`, and schedules the next one.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due = now + self.period;
        true
    }

    pub fn next_deadline(&self) -> Instant {
        self.next_due
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn n_ticks_add_exactly_step_times_n() {
        let mut clock = FrameClock::new(59.0);
        for _ in 0..1000 {
            clock.tick();
        }
        assert_eq!(clock.ticks(), 1000);
        assert_eq!(clock.now(), 59.0 + 0.01 * 1000_f32);
    }

    #[test]
    fn clock_starts_at_initial_value() {
        assert_eq!(FrameClock::new(0.0).now(), 0.0);
        assert_eq!(FrameClock::default().ticks(), 0);
    }

    #[test]
    fn clock_is_monotonic() {
        let mut clock = FrameClock::new(0.0);
        let mut last = clock.now();
        for _ in 0..500 {
            let t = clock.tick();
            assert!(t > last, "{t} <= {last}");
            last = t;
        }
    }

    #[test]
    fn negative_initial_is_clamped() {
        assert_eq!(FrameClock::new(-3.0).now(), 0.0);
    }

    #[test]
    fn cadence_waits_for_full_period() {
        let start = Instant::now();
        let mut cadence = Cadence::new(TICK_PERIOD, start);
        assert!(!cadence.poll(start));
        assert!(!cadence.poll(start + Duration::from_millis(15)));
        assert!(cadence.poll(start + TICK_PERIOD));
    }

    #[test]
    fn cadence_does_not_replay_missed_periods() {
        let start = Instant::now();
        let mut cadence = Cadence::new(TICK_PERIOD, start);
        let late = start + Duration::from_millis(160);
        assert!(cadence.poll(late));
        // Ten periods elapsed, but only one tick is produced.
        assert!(!cadence.poll(late));
        assert_eq!(cadence.next_deadline(), late + TICK_PERIOD);
    }
}
