use std::time::{Duration, Instant};

/// Wall clock for the host tick loop.
/// Deltas are capped so a stalled frame does not turn into one huge stroke step.
#[derive(Debug)]
pub struct Clock {
    last_tick: Instant,
    max_delta: f32,
    ticks: u64,
}

impl Clock {
    /// Create clock starting now, capping deltas at `max_delta` seconds
    pub fn new(max_delta: f32) -> Self {
        Self {
            last_tick: Instant::now(),
            max_delta,
            ticks: 0,
        }
    }

    /// Seconds since the previous tick (capped), advancing the clock
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        self.ticks += 1;
        delta.min(self.max_delta)
    }

    /// Sleep until `period` has passed since the previous tick, then tick
    pub fn tick_paced(&mut self, period: Duration) -> f32 {
        let since = self.last_tick.elapsed();
        if since < period {
            std::thread::sleep(period - since);
        }
        self.tick()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(0.25)
    }
}
