//! # Studyroom Core Library
//!
//! This library provides the core logic for the Studyroom study planner.
//! The `studyroom-cli` binary is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Planner**: Urgency-weighted round-robin allocator that turns a subject
//!   snapshot into one day of study and break blocks
//! - **Timers**: Tick-driven state machines for a multi-round Pomodoro and a
//!   free-running stopwatch; neither owns a thread
//! - **Driver**: Tokio loop that feeds a timer one tick per second and
//!   forwards its events to an observer
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`Planner`]: Timetable generation
//! - [`PomodoroSequencer`]: Work/break countdown
//! - [`ManualTimer`]: Elapsed-time counter
//! - [`TimerDriver`]: Async heartbeat for either timer
//! - [`Config`]: Application configuration management

pub mod driver;
pub mod error;
pub mod events;
pub mod planner;
pub mod storage;
pub mod subject;
pub mod timer;

pub use driver::{stop_channel, RunOutcome, StopHandle, StopSignal, Ticking, TimerDriver, TimerObserver};
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::{DisplayUpdate, Event, TimerSource};
pub use planner::{generate, EntryKind, Planner, PlannerConfig, Timetable, TimetableEntry};
pub use storage::Config;
pub use subject::{Subject, SubjectSheet, SubjectSource};
pub use timer::{
    ManualTimer, PomodoroPlan, PomodoroSequencer, Segment, SegmentKind, SteppedClock, SystemClock,
    TimerState,
};
