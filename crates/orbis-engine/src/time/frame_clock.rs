use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds (already clamped).
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped to `(0, dt_max]`. A non-positive reading (first frame
/// at the same instant, clock stall, timestamps delivered out of order) falls
/// back to `dt_fallback`; a long gap (debugger pause, minimized window) is
/// capped at `dt_max` so content updates never take a runaway step.
///
/// The baseline always advances to the latest reading, even when the delta
/// was clamped, so clamping never compounds into drift.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    dt_fallback: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Upper bound for a single step: 50 ms.
    pub const DEFAULT_DT_MAX: Duration = Duration::from_millis(50);

    /// Step used when the measured delta is zero or negative: 1/240 s.
    pub const DEFAULT_DT_FALLBACK: Duration = Duration::from_nanos(1_000_000_000 / 240);

    /// Creates a clock whose baseline is the current instant.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Creates a clock with an explicit baseline.
    pub fn starting_at(last: Instant) -> Self {
        Self::with_clamps(last, Self::DEFAULT_DT_FALLBACK, Self::DEFAULT_DT_MAX)
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(last: Instant, dt_fallback: Duration, dt_max: Duration) -> Self {
        debug_assert!(!dt_fallback.is_zero() && dt_fallback <= dt_max);
        Self {
            last,
            frame_index: 0,
            dt_fallback,
            dt_max,
        }
    }

    /// Timestamp of the most recent tick (or the baseline before the first one).
    pub fn last(&self) -> Instant {
        self.last
    }

    /// Advances the clock to `now` and returns the clamped step.
    pub fn tick(&mut self, now: Instant) -> FrameTime {
        let dt = self.clamp(now.checked_duration_since(self.last));
        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }

    /// Convenience wrapper reading the monotonic clock.
    pub fn tick_now(&mut self) -> FrameTime {
        self.tick(Instant::now())
    }

    fn clamp(&self, raw: Option<Duration>) -> Duration {
        match raw {
            None => self.dt_fallback,
            Some(d) if d.is_zero() => self.dt_fallback,
            Some(d) => d.min(self.dt_max),
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    const FALLBACK: f32 = 1.0 / 240.0;

    #[test]
    fn one_millisecond_apart() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(t0);
        let ft = clock.tick(t0 + Duration::from_millis(1));
        assert_relative_eq!(ft.dt, 0.001, epsilon = 1e-6);
    }

    #[test]
    fn identical_timestamp_uses_fallback() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(t0);
        let t1 = t0 + Duration::from_millis(16);
        clock.tick(t1);
        let ft = clock.tick(t1);
        assert_relative_eq!(ft.dt, FALLBACK, epsilon = 1e-6);
        assert!(ft.dt > 0.0);
    }

    #[test]
    fn backwards_timestamp_uses_fallback_and_rebases() {
        let t0 = Instant::now() + Duration::from_secs(1);
        let mut clock = FrameClock::starting_at(t0);
        let earlier = t0 - Duration::from_millis(5);
        let ft = clock.tick(earlier);
        assert_relative_eq!(ft.dt, FALLBACK, epsilon = 1e-6);
        assert_eq!(clock.last(), earlier);
    }

    #[test]
    fn long_gap_is_capped() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(t0);
        let ft = clock.tick(t0 + Duration::from_secs(3));
        assert_relative_eq!(ft.dt, 0.050, epsilon = 1e-6);
    }

    #[test]
    fn baseline_advances_even_when_clamped() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(t0);
        let t1 = t0 + Duration::from_secs(2);
        clock.tick(t1);
        let ft = clock.tick(t1 + Duration::from_millis(10));
        assert_relative_eq!(ft.dt, 0.010, epsilon = 1e-6);
    }

    #[test]
    fn frame_index_counts_ticks() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(t0);
        assert_eq!(clock.tick(t0 + Duration::from_millis(1)).frame_index, 0);
        assert_eq!(clock.tick(t0 + Duration::from_millis(2)).frame_index, 1);
    }
}
