use std::time::{Duration, Instant};

/// Rolling frames-per-second estimate.
///
/// Reports once per `window` (0.25 s by default), then starts a new window.
#[derive(Debug, Clone)]
pub struct FpsMeter {
    last: Instant,
    frames: u32,
    acc: Duration,
    window: Duration,
}

impl FpsMeter {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(last: Instant) -> Self {
        Self {
            last,
            frames: 0,
            acc: Duration::ZERO,
            window: Duration::from_millis(250),
        }
    }

    /// Counts one frame presented at `now`.
    ///
    /// Returns `Some(fps)` when a full window has accumulated.
    pub fn tick(&mut self, now: Instant) -> Option<f64> {
        self.frames += 1;
        self.acc += now.saturating_duration_since(self.last);
        self.last = now;

        if self.acc < self.window {
            return None;
        }

        let fps = f64::from(self.frames) / self.acc.as_secs_f64();
        self.frames = 0;
        self.acc = Duration::ZERO;
        Some(fps)
    }
}

impl Default for FpsMeter {
    fn default() -> Self {
        Self::new()
    }
}
