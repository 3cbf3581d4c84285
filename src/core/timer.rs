/// Tick-driven timers. Each one accumulates delta time handed to it by the
/// host loop and decides when to fire; none of them block.

/// Countdown timer - fires once after duration
#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    duration: f32,
    elapsed: f32,
    active: bool,
}

impl Countdown {
    /// Create inactive countdown
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed: 0.0,
            active: false,
        }
    }

    /// Start (or restart) the countdown
    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.active = true;
    }

    /// Stop without firing
    pub fn cancel(&mut self) {
        self.active = false;
    }

    /// Tick with delta, returns true on the tick the countdown completes
    pub fn tick(&mut self, delta: f32) -> bool {
        if !self.active {
            return false;
        }

        self.elapsed += delta;

        if self.elapsed >= self.duration {
            self.elapsed = self.duration;
            self.active = false;
            true
        } else {
            false
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Seconds left, zero once complete
    pub fn remaining(&self) -> f32 {
        (self.duration - self.elapsed).max(0.0)
    }

    /// Get progress [0, 1]
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).min(1.0)
    }
}

/// Interval gate - becomes due after `period` seconds and stays due until reset.
/// Reset drops any overshoot rather than carrying it into the next period.
#[derive(Debug, Clone, Copy)]
pub struct Interval {
    period: f32,
    elapsed: f32,
}

impl Interval {
    pub fn new(period: f32) -> Self {
        Self { period, elapsed: 0.0 }
    }

    pub fn accumulate(&mut self, delta: f32) {
        self.elapsed += delta;
    }

    pub fn is_due(&self) -> bool {
        self.elapsed >= self.period
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    pub fn period(&self) -> f32 {
        self.period
    }
}

/// Scheduled continuations: payloads released once their delay has elapsed
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    /// (seconds remaining, payload), unordered
    pending: Vec<(f32, T)>,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self { pending: Vec::new() }
    }

    /// Release `payload` after `delay` seconds of ticks
    pub fn schedule(&mut self, delay: f32, payload: T) {
        self.pending.push((delay.max(0.0), payload));
    }

    /// Advance every timer and return the payloads that came due, earliest deadline first
    pub fn advance(&mut self, delta: f32) -> Vec<T> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            self.pending[i].0 -= delta;
            if self.pending[i].0 <= 0.0 {
                due.push(self.pending.swap_remove(i));
            } else {
                i += 1;
            }
        }

        due.sort_by(|a, b| a.0.total_cmp(&b.0));
        due.into_iter().map(|(_, payload)| payload).collect()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
