use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{SegmentKind, TimerState};

/// Which timer produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerSource {
    Pomodoro,
    Manual,
}

/// What a display should show right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayUpdate {
    pub source: TimerSource,
    /// Ready-to-show text, e.g. `24:59` or `00:02:05`.
    pub formatted: String,
    pub state: TimerState,
    /// Seconds left for the Pomodoro, seconds elapsed for the manual timer.
    pub seconds: u64,
    /// Current Pomodoro segment, if any.
    #[serde(default)]
    pub segment: Option<SegmentKind>,
}

impl DisplayUpdate {
    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }
}

/// Every timer state change produces one or more events.
/// Observers render them; the CLI prints them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    Display(DisplayUpdate),
    SegmentAdvanced {
        segment_index: usize,
        kind: SegmentKind,
        duration_secs: u64,
    },
    PomodoroCompleted {
        segments: usize,
        at: DateTime<Utc>,
    },
    ManualTimerStopped {
        elapsed_secs: u64,
        formatted: String,
        started_at: DateTime<Utc>,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Formatted text if this is a display update.
    pub fn display_text(&self) -> Option<&str> {
        match self {
            Event::Display(update) => Some(&update.formatted),
            _ => None,
        }
    }

    /// Whether this event ends a run.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Event::PomodoroCompleted { .. } | Event::ManualTimerStopped { .. }
        )
    }
}
