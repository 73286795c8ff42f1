//! Timer sources.
//!
//! The controller never sleeps. A [`TimerSource`] is only told when ticks
//! should start and stop flowing; the driver that owns the clock delivers
//! each tick by calling `QuizController::on_tick`.

/// A repeating one-second clock that can be stopped.
pub trait TimerSource {
    fn start(&mut self);
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}

/// Timer that never fires on its own; the caller ticks by hand.
///
/// Counts start calls so tests can check the once-per-session rule.
#[derive(Debug, Default, Clone)]
pub struct ManualTimer {
    running: bool,
    starts: usize,
    stops: usize,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starts(&self) -> usize {
        self.starts
    }

    pub fn stops(&self) -> usize {
        self.stops
    }
}

impl TimerSource for ManualTimer {
    fn start(&mut self) {
        self.running = true;
        self.starts += 1;
    }

    fn stop(&mut self) {
        self.running = false;
        self.stops += 1;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}
