use super::mode::FocusMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Completed,
}

/// Countdown state for the active program. The app owns a single 1 Hz
/// interval and forwards its ticks here, so toggling the session on and off
/// never stacks timers; completion fires exactly once per run.
#[derive(Debug, Clone)]
pub struct FocusTimer {
    mode: FocusMode,
    remaining: u64,
    active: bool,
    completed: bool,
}

impl FocusTimer {
    pub fn new(mode: FocusMode) -> Self {
        Self {
            mode,
            remaining: mode.duration_seconds(),
            active: false,
            completed: false,
        }
    }

    pub fn mode(&self) -> FocusMode {
        self.mode
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn total(&self) -> u64 {
        self.mode.duration_seconds()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Fraction of the program still ahead, for the meter ring.
    pub fn fraction_remaining(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.remaining as f64 / total as f64
        }
    }

    /// Switching programs cancels any running session and rewinds the
    /// countdown to the new program's length, so a completion is always
    /// attributed to the program it actually ran.
    pub fn set_mode(&mut self, mode: FocusMode) {
        self.active = false;
        self.mode = mode;
        self.remaining = mode.duration_seconds();
        self.completed = false;
    }

    pub fn start(&mut self) {
        if self.remaining == 0 {
            self.remaining = self.mode.duration_seconds();
        }
        self.active = true;
        self.completed = false;
    }

    pub fn stop(&mut self) {
        self.active = false;
        self.remaining = self.mode.duration_seconds();
    }

    pub fn toggle(&mut self) {
        if self.active {
            self.stop();
        } else {
            self.start();
        }
    }

    pub fn tick(&mut self) -> Option<TimerEvent> {
        if !self.active || self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        if self.remaining == 0 && !self.completed {
            self.completed = true;
            self.active = false;
            return Some(TimerEvent::Completed);
        }
        None
    }
}
