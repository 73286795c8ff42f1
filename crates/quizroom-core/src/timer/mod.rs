mod countdown;
mod source;

pub use countdown::{format_hms, Countdown, CountdownState, Tick};
pub use source::{ManualTimer, TimerSource};
