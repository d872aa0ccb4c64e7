//! Free-running stopwatch.
//!
//! Elapsed time is always recomputed from the recorded start instant, so a
//! late or dropped tick never makes the display drift.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::clock::{Clock, SystemClock};
use super::format::format_hms;
use super::TimerState;
use crate::events::{DisplayUpdate, Event, TimerSource};

/// Result of stopping the manual timer.
#[derive(Debug, Clone, PartialEq)]
pub struct ManualStop {
    pub elapsed_secs: u64,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone)]
pub struct ManualTimer<C: Clock = SystemClock> {
    clock: C,
    started_at: Option<DateTime<Utc>>,
    elapsed_secs: u64,
}

impl ManualTimer<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for ManualTimer<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> ManualTimer<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            started_at: None,
            elapsed_secs: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn state(&self) -> TimerState {
        if self.is_running() {
            TimerState::Running
        } else {
            TimerState::Idle
        }
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Seconds shown on the last emitted display.
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn snapshot(&self) -> DisplayUpdate {
        DisplayUpdate {
            source: TimerSource::Manual,
            formatted: format_hms(self.elapsed_secs),
            state: self.state(),
            seconds: self.elapsed_secs,
            segment: None,
        }
    }

    /// Record the start instant. No-op while running.
    pub fn start(&mut self) -> Vec<Event> {
        if self.is_running() {
            return Vec::new();
        }
        let now = self.clock.now();
        self.started_at = Some(now);
        self.elapsed_secs = 0;
        debug!(started_at = %now, "manual timer started");
        vec![Event::Display(self.snapshot())]
    }

    /// Refresh the elapsed display. No-op unless running.
    pub fn tick(&mut self) -> Vec<Event> {
        let Some(started_at) = self.started_at else {
            return Vec::new();
        };
        self.elapsed_secs = self.elapsed_since(started_at);
        vec![Event::Display(self.snapshot())]
    }

    /// Stop and report the total. Returns zero and no events unless running.
    pub fn stop(&mut self) -> ManualStop {
        let Some(started_at) = self.started_at.take() else {
            return ManualStop {
                elapsed_secs: 0,
                events: Vec::new(),
            };
        };
        let elapsed_secs = self.elapsed_since(started_at);
        let formatted = format_hms(elapsed_secs);
        info!(elapsed_secs, "manual timer stopped");

        let completed = Event::ManualTimerStopped {
            elapsed_secs,
            formatted,
            started_at,
            at: self.clock.now(),
        };
        self.elapsed_secs = 0;
        ManualStop {
            elapsed_secs,
            events: vec![completed, Event::Display(self.snapshot())],
        }
    }

    fn elapsed_since(&self, started_at: DateTime<Utc>) -> u64 {
        let secs = (self.clock.now() - started_at).num_seconds();
        u64::try_from(secs).unwrap_or(0)
    }
}

/// Closing line shown once a manual session ends.
pub fn session_summary(elapsed_secs: u64) -> String {
    format!("You studied productively for {}", format_hms(elapsed_secs))
}
