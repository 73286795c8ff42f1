//! Session countdown.
//!
//! A plain value type: it does not own a clock. Whoever drives the session
//! calls `tick()` once per second.
//!
//! ```text
//! Idle -> Running -> (Expired | Stopped)
//! ```
//!
//! `start()` only succeeds from `Idle`, so the countdown runs at most once
//! per session and there is no pause or resume.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownState {
    Idle,
    Running,
    /// Ran out of time.
    Expired,
    /// Halted before running out, e.g. because the session completed.
    Stopped,
}

/// Outcome of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// One second elapsed; carries the new remaining time.
    Ticked(u64),
    /// The countdown was already at zero and has now stopped for good.
    Expired,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Countdown {
    remaining_secs: u64,
    state: CountdownState,
}

impl Countdown {
    pub fn new(remaining_secs: u64) -> Self {
        Self {
            remaining_secs,
            state: CountdownState::Idle,
        }
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == CountdownState::Running
    }

    pub fn is_expired(&self) -> bool {
        self.state == CountdownState::Expired
    }

    /// Returns `true` if this call started the countdown.
    pub fn start(&mut self) -> bool {
        if self.state != CountdownState::Idle {
            return false;
        }
        self.state = CountdownState::Running;
        true
    }

    /// Halt for good without expiring. No-op once expired.
    pub fn stop(&mut self) {
        if self.state != CountdownState::Expired {
            self.state = CountdownState::Stopped;
        }
    }

    /// Advance by one second. `None` when not running.
    pub fn tick(&mut self) -> Option<Tick> {
        if self.state != CountdownState::Running {
            return None;
        }
        if self.remaining_secs == 0 {
            self.state = CountdownState::Expired;
            return Some(Tick::Expired);
        }
        self.remaining_secs -= 1;
        Some(Tick::Ticked(self.remaining_secs))
    }

    pub fn display(&self) -> String {
        format_hms(self.remaining_secs)
    }
}

/// Zero-padded `HH:MM:SS`. Hours are not capped at 99.
pub fn format_hms(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_hms() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(59), "00:00:59");
        assert_eq!(format_hms(90 * 60), "01:30:00");
        assert_eq!(format_hms(3 * 3600 + 7 * 60 + 5), "03:07:05");
        assert_eq!(format_hms(100 * 3600), "100:00:00");
    }

    #[test]
    fn starts_only_once() {
        let mut countdown = Countdown::new(10);
        assert!(countdown.start());
        assert!(!countdown.start());
        assert!(countdown.is_running());
    }

    #[test]
    fn idle_countdown_does_not_tick() {
        let mut countdown = Countdown::new(10);
        assert_eq!(countdown.tick(), None);
        assert_eq!(countdown.remaining_secs(), 10);
    }

    #[test]
    fn ticks_down_then_expires() {
        let mut countdown = Countdown::new(2);
        countdown.start();
        assert_eq!(countdown.tick(), Some(Tick::Ticked(1)));
        assert_eq!(countdown.tick(), Some(Tick::Ticked(0)));
        assert_eq!(countdown.tick(), Some(Tick::Expired));
        assert!(countdown.is_expired());
        assert_eq!(countdown.display(), "00:00:00");
    }

    #[test]
    fn stopped_countdown_keeps_remaining_time() {
        let mut countdown = Countdown::new(30);
        countdown.start();
        countdown.tick();
        countdown.stop();
        assert_eq!(countdown.tick(), None);
        assert_eq!(countdown.remaining_secs(), 29);
        assert_eq!(countdown.state(), CountdownState::Stopped);
        assert!(!countdown.start());
    }

    #[test]
    fn expired_countdown_stays_stopped() {
        let mut countdown = Countdown::new(0);
        countdown.start();
        assert_eq!(countdown.tick(), Some(Tick::Expired));
        assert_eq!(countdown.tick(), None);
        assert!(!countdown.start());
        assert_eq!(countdown.remaining_secs(), 0);
    }
}
