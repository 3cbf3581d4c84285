use std::cell::Cell;
use std::rc::Rc;

use super::timer::Countdown;

/// Default length of a timed drawing window, in seconds
pub const DEFAULT_WINDOW_SECS: f32 = 480.0;

/// Signal that locks or unlocks drawing. Polled once per tick by every marker.
pub trait DrawingGate {
    fn is_drawing_enabled(&self) -> bool;
}

/// Shared on/off switch. Clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct GateSwitch {
    enabled: Rc<Cell<bool>>,
}

impl GateSwitch {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: Rc::new(Cell::new(enabled)),
        }
    }

    pub fn set(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    pub fn enable(&self) {
        self.set(true);
    }

    pub fn disable(&self) {
        self.set(false);
    }

    /// Type-erased handle for injection into a marker
    pub fn shared(&self) -> Rc<dyn DrawingGate> {
        Rc::new(self.clone())
    }
}

impl DrawingGate for GateSwitch {
    fn is_drawing_enabled(&self) -> bool {
        self.enabled.get()
    }
}

/// Time-limited drawing session.
///
/// Opening the window enables drawing; when its countdown runs out drawing is
/// locked again until the next `open`.
#[derive(Debug, Clone)]
pub struct DrawingWindow {
    switch: GateSwitch,
    countdown: Countdown,
}

impl DrawingWindow {
    /// Closed window of `duration` seconds
    pub fn new(duration: f32) -> Self {
        Self {
            switch: GateSwitch::new(false),
            countdown: Countdown::new(duration),
        }
    }

    /// Handle for markers; reflects every later open/close
    pub fn gate(&self) -> GateSwitch {
        self.switch.clone()
    }

    /// Enable drawing and restart the countdown
    pub fn open(&mut self) {
        self.countdown.start();
        self.switch.enable();
        log::info!("drawing window opened for {}", self.remaining_label());
    }

    /// Enable drawing with no deadline
    pub fn open_unlimited(&mut self) {
        self.countdown.cancel();
        self.switch.enable();
        log::info!("drawing enabled without time limit");
    }

    pub fn close(&mut self) {
        self.countdown.cancel();
        self.switch.disable();
    }

    /// Advance the countdown. Returns true on the tick the window expires.
    pub fn update(&mut self, delta: f32) -> bool {
        if !self.countdown.tick(delta) {
            return false;
        }

        self.switch.disable();
        log::info!("drawing window expired, drawing locked");
        true
    }

    pub fn is_timed(&self) -> bool {
        self.countdown.is_active()
    }

    /// Seconds left while timed, otherwise zero
    pub fn remaining(&self) -> f32 {
        if self.countdown.is_active() {
            self.countdown.remaining()
        } else {
            0.0
        }
    }

    /// Remaining time as `MM:SS`, whole seconds rounded down
    pub fn remaining_label(&self) -> String {
        let secs = self.remaining().max(0.0) as u32;
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}

impl Default for DrawingWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SECS)
    }
}

impl DrawingGate for DrawingWindow {
    fn is_drawing_enabled(&self) -> bool {
        self.switch.is_drawing_enabled()
    }
}
