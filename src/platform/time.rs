//! Monotonic time and frame pacing

use std::time::{Duration, Instant};

use super::Clock;

/// Milliseconds since construction, backed by `Instant`
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Caps the loop at a fixed frame rate by sleeping off the remainder
#[derive(Debug)]
pub struct FrameLimiter {
    frame: Duration,
    last: Option<Instant>,
}

impl FrameLimiter {
    pub fn new(fps: u32) -> Self {
        Self {
            frame: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
            last: None,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// How long to sleep if a frame ended at `now`
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.last {
            Some(last) => self.frame.saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        }
    }

    /// Block until a full frame has elapsed since the previous call
    pub fn wait(&mut self) {
        let remaining = self.remaining(Instant::now());
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
        self.last = Some(Instant::now());
    }
}
