use std::time::{Duration, Instant};

use crate::core::error::{ConfigError, Result};

/// Default spacing between ticks at 1.0x speed.
pub const BASE_INTERVAL: Duration = Duration::from_millis(1000);

/// Wall-clock pacing for a caller-owned play loop.
///
/// The engine has no notion of wall-clock time; a display loop owns a
/// `Pacer` and calls `Simulation::step` once per tick `due_ticks`
/// reports. Manual stepping bypasses the pacer entirely. All clock
/// readings come in from the caller, so tests stay deterministic.
#[derive(Debug, Clone)]
pub struct Pacer {
    base: Duration,
    speed: f64,
    next_due: Option<Instant>,
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new(BASE_INTERVAL)
    }
}

impl Pacer {
    pub fn new(base: Duration) -> Self {
        Self {
            base,
            speed: 1.0,
            next_due: None,
        }
    }

    /// Current spacing between ticks: `base / speed`.
    pub fn interval(&self) -> Duration {
        self.base.div_f64(self.speed)
    }

    /// Adjust playback speed without touching simulated time. The new
    /// spacing applies from the next firing onward.
    pub fn set_speed(&mut self, speed: f64) -> Result<()> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(ConfigError::Speed(speed));
        }
        self.speed = speed;
        Ok(())
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn play(&mut self, now: Instant) {
        if self.next_due.is_none() {
            self.next_due = Some(now + self.interval());
        }
    }

    /// Pausing = not firing. There is nothing in flight to abort: every
    /// tick is atomic inside `Simulation::step`.
    pub fn pause(&mut self) {
        self.next_due = None;
    }

    pub fn is_playing(&self) -> bool {
        self.next_due.is_some()
    }

    /// Number of ticks owed since the last poll. Catches up after a
    /// stalled loop instead of drifting.
    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        let Some(mut due) = self.next_due else {
            return 0;
        };
        let mut owed = 0;
        while due <= now {
            owed += 1;
            due += self.interval();
        }
        self.next_due = Some(due);
        owed
    }
}
