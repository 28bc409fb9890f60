//! Clocks and frame pacing

use std::time::{Duration, Instant};

/// Monotonic millisecond time source
pub trait Clock {
    fn now_ms(&self) -> u64;

    /// Called once per frame. Simulated clocks step forward; real clocks
    /// ignore it.
    fn advance_frame(&mut self, _frame_ms: u64) {}
}

/// Wall clock measured from construction
#[derive(Debug, Clone)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Clock that only moves when told to (tests, unpaced runs)
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: u64,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self { now: start_ms }
    }

    pub fn advance(&mut self, ms: u64) {
        self.now += ms;
    }

    pub fn set(&mut self, ms: u64) {
        self.now = self.now.max(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now
    }

    fn advance_frame(&mut self, frame_ms: u64) {
        self.advance(frame_ms);
    }
}

/// Fixed-rate ticker. Sleeps out the remainder of each frame; a frame that
/// overruns its budget simply runs late, nothing is skipped.
#[derive(Debug, Clone)]
pub struct FramePacer {
    frame: Duration,
    next_deadline: Instant,
}

impl FramePacer {
    pub fn new(target_fps: u32) -> Self {
        let frame = Duration::from_secs_f64(1.0 / target_fps.max(1) as f64);
        Self {
            frame,
            next_deadline: Instant::now() + frame,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Block until the next frame is due
    pub fn wait(&mut self) {
        let now = Instant::now();
        if let Some(remaining) = self.next_deadline.checked_duration_since(now) {
            std::thread::sleep(remaining);
            self.next_deadline += self.frame;
        } else {
            // Overran: restart the schedule from now rather than catching up
            self.next_deadline = now + self.frame;
        }
    }
}
