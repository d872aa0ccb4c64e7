mod clock;
mod format;
mod manual;
mod pomodoro;

use serde::{Deserialize, Serialize};

pub use clock::{Clock, SteppedClock, SystemClock};
pub use format::{format_countdown, format_hms};
pub use manual::{session_summary, ManualStop, ManualTimer};
pub use pomodoro::{PomodoroPlan, PomodoroSequencer, Segment, SegmentKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    /// Reported once when a Pomodoro plan runs out, then back to `Idle`.
    Completed,
}
