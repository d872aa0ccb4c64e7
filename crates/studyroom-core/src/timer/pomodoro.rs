//! Pomodoro round sequencer.
//!
//! A run is a fixed [`PomodoroPlan`] of work and break segments. The
//! sequencer has no thread of its own: the caller invokes `tick()` once per
//! elapsed second and forwards the returned events to a display.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Completed -> Idle
//!            |                     ^
//!            +------- stop() ------+
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::format::format_countdown;
use super::TimerState;
use crate::events::{DisplayUpdate, Event, TimerSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Work,
    Break,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub duration_secs: u64,
}

/// Ordered work/break segments for one run. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroPlan {
    segments: Vec<Segment>,
}

impl PomodoroPlan {
    /// Work, break, work, ... ending on work: `2 * rounds - 1` segments.
    ///
    /// Inputs are not validated. `rounds <= 0` gives an empty plan and
    /// negative minutes count by their magnitude.
    pub fn build(work_minutes: i64, break_minutes: i64, rounds: i64) -> Self {
        let work_secs = minutes_to_secs(work_minutes);
        let break_secs = minutes_to_secs(break_minutes);
        let mut segments = Vec::new();
        for i in 0..rounds.max(0) {
            segments.push(Segment {
                kind: SegmentKind::Work,
                duration_secs: work_secs,
            });
            if i < rounds - 1 {
                segments.push(Segment {
                    kind: SegmentKind::Break,
                    duration_secs: break_secs,
                });
            }
        }
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn total_secs(&self) -> u64 {
        self.segments.iter().map(|s| s.duration_secs).sum()
    }
}

fn minutes_to_secs(minutes: i64) -> u64 {
    minutes.unsigned_abs().saturating_mul(60)
}

/// Countdown over a [`PomodoroPlan`].
#[derive(Debug, Clone)]
pub struct PomodoroSequencer {
    plan: PomodoroPlan,
    state: TimerState,
    plan_index: usize,
    seconds_left: u64,
}

impl PomodoroSequencer {
    pub fn new() -> Self {
        Self {
            plan: PomodoroPlan::build(0, 0, 0),
            state: TimerState::Idle,
            plan_index: 0,
            seconds_left: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn plan(&self) -> &PomodoroPlan {
        &self.plan
    }

    pub fn plan_index(&self) -> usize {
        self.plan_index
    }

    pub fn seconds_left(&self) -> u64 {
        self.seconds_left
    }

    pub fn current_segment(&self) -> Option<&Segment> {
        if self.is_running() {
            self.plan.get(self.plan_index)
        } else {
            None
        }
    }

    pub fn formatted(&self) -> String {
        format_countdown(self.seconds_left)
    }

    /// Current display payload.
    pub fn snapshot(&self) -> DisplayUpdate {
        DisplayUpdate {
            source: TimerSource::Pomodoro,
            formatted: self.formatted(),
            state: self.state,
            seconds: self.seconds_left,
            segment: self.current_segment().map(|s| s.kind),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Build a fresh plan and begin counting down. No-op while running.
    pub fn start(&mut self, work_minutes: i64, break_minutes: i64, rounds: i64) -> Vec<Event> {
        if self.is_running() {
            return Vec::new();
        }
        self.plan = PomodoroPlan::build(work_minutes, break_minutes, rounds);
        self.plan_index = 0;
        self.seconds_left = self.plan.get(0).map(|s| s.duration_secs).unwrap_or(0);
        self.state = TimerState::Running;
        debug!(
            segments = self.plan.len(),
            total_secs = self.plan.total_secs(),
            "pomodoro started"
        );
        vec![self.display()]
    }

    /// Advance by one second.
    ///
    /// The final segment completes the run on the tick that drains it.
    /// An empty plan completes on the first tick.
    pub fn tick(&mut self) -> Vec<Event> {
        if !self.is_running() {
            return Vec::new();
        }
        let mut events = Vec::new();

        if self.seconds_left == 0 {
            self.plan_index += 1;
            let Some(next) = self.plan.get(self.plan_index).copied() else {
                self.finish(&mut events);
                return events;
            };
            self.seconds_left = next.duration_secs;
            debug!(index = self.plan_index, kind = ?next.kind, "pomodoro segment advanced");
            events.push(Event::SegmentAdvanced {
                segment_index: self.plan_index,
                kind: next.kind,
                duration_secs: next.duration_secs,
            });
            events.push(self.display());
        }

        self.seconds_left = self.seconds_left.saturating_sub(1);
        if self.seconds_left == 0 && self.plan_index + 1 >= self.plan.len() {
            self.finish(&mut events);
        } else {
            events.push(self.display());
        }
        events
    }

    /// Halt the run and zero the display. No-op unless running.
    pub fn stop(&mut self) -> Vec<Event> {
        if !self.is_running() {
            return Vec::new();
        }
        self.halt(TimerState::Idle);
        debug!(index = self.plan_index, "pomodoro stopped");
        vec![self.display()]
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn halt(&mut self, state: TimerState) {
        self.seconds_left = 0;
        self.state = state;
    }

    fn finish(&mut self, events: &mut Vec<Event>) {
        self.halt(TimerState::Completed);
        events.push(self.display());
        info!(segments = self.plan.len(), "pomodoro complete");
        events.push(Event::PomodoroCompleted {
            segments: self.plan.len(),
            at: Utc::now(),
        });
        self.state = TimerState::Idle;
    }

    fn display(&self) -> Event {
        Event::Display(self.snapshot())
    }
}

impl Default for PomodoroSequencer {
    fn default() -> Self {
        Self::new()
    }
}
