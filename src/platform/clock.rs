//! Fixed-rate tick clock

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS};

/// Slack for float drift when a frame lasts exactly one tick
const TICK_EPSILON: f64 = 1e-9;

/// Accumulates frame time and hands out whole simulation ticks
#[derive(Debug, Clone)]
pub struct FrameClock {
    tick_dt: f64,
    accumulator: f64,
    /// Timestamp of the previous frame in milliseconds
    last_time: Option<f64>,
}

impl FrameClock {
    pub fn new(tick_dt: f64) -> Self {
        Self {
            tick_dt,
            accumulator: 0.0,
            last_time: None,
        }
    }

    /// Seconds per tick
    pub fn tick_dt(&self) -> f64 {
        self.tick_dt
    }

    /// Feed an animation-frame timestamp (ms) and get the number of ticks to
    /// run this frame. The first frame only sets the reference time.
    pub fn advance(&mut self, time_ms: f64) -> u32 {
        let Some(last) = self.last_time.replace(time_ms) else {
            return 0;
        };

        // Long stalls (background tab, debugger) are clamped
        let dt = ((time_ms - last) / 1000.0).clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut ticks = 0;
        while self.accumulator + TICK_EPSILON >= self.tick_dt && ticks < MAX_SUBSTEPS {
            self.accumulator -= self.tick_dt;
            ticks += 1;
        }

        if ticks == MAX_SUBSTEPS {
            // Drop the backlog instead of spiralling
            self.accumulator = self.accumulator.min(self.tick_dt);
        }
        self.accumulator = self.accumulator.max(0.0);

        ticks
    }

    /// Forget the timing history; the browser calls this when the page is shown again
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_time = None;
    }
}
