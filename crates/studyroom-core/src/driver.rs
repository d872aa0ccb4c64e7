//! Async driver for the timers.
//!
//! The timers are plain state machines; this module gives one of them a
//! heartbeat. [`TimerDriver::run`] owns the timer for the whole run, so at
//! most one tick is ever in flight, and forwards every event to a
//! [`TimerObserver`]. A [`StopHandle`] cancels the run from anywhere.
//!
//! ## Usage
//!
//! ```ignore
//! let (handle, signal) = stop_channel();
//! let mut pomodoro = PomodoroSequencer::new();
//! pomodoro.start(25, 5, 4);
//! let outcome = TimerDriver::every_second()
//!     .run(&mut pomodoro, &mut |e: &Event| println!("{e:?}"), signal)
//!     .await;
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use crate::events::Event;
use crate::timer::{Clock, ManualTimer, PomodoroSequencer};

/// A timer the driver can advance.
pub trait Ticking {
    /// One period has elapsed.
    fn on_tick(&mut self) -> Vec<Event>;
    /// Stop early.
    fn halt(&mut self) -> Vec<Event>;
    fn is_running(&self) -> bool;
}

impl Ticking for PomodoroSequencer {
    fn on_tick(&mut self) -> Vec<Event> {
        self.tick()
    }

    fn halt(&mut self) -> Vec<Event> {
        self.stop()
    }

    fn is_running(&self) -> bool {
        PomodoroSequencer::is_running(self)
    }
}

impl<C: Clock> Ticking for ManualTimer<C> {
    fn on_tick(&mut self) -> Vec<Event> {
        self.tick()
    }

    fn halt(&mut self) -> Vec<Event> {
        self.stop().events
    }

    fn is_running(&self) -> bool {
        ManualTimer::is_running(self)
    }
}

/// Receives every event a running timer produces.
pub trait TimerObserver {
    fn on_event(&mut self, event: &Event);
}

impl<F: FnMut(&Event)> TimerObserver for F {
    fn on_event(&mut self, event: &Event) {
        self(event)
    }
}

/// How a driven run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The timer stopped by itself.
    Finished,
    /// A stop was requested through the [`StopHandle`].
    Cancelled,
}

/// Requests a running driver to stop the timer.
#[derive(Debug, Clone)]
pub struct StopHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.tx.send_replace(true);
    }
}

/// Receiving side of [`StopHandle`], consumed by [`TimerDriver::run`].
#[derive(Debug)]
pub struct StopSignal {
    rx: watch::Receiver<bool>,
}

pub fn stop_channel() -> (StopHandle, StopSignal) {
    let (tx, rx) = watch::channel(false);
    (StopHandle { tx: Arc::new(tx) }, StopSignal { rx })
}

/// Delivers ticks at a fixed period.
#[derive(Debug, Clone, Copy)]
pub struct TimerDriver {
    period: Duration,
}

impl TimerDriver {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    pub fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Tick `timer` until it stops by itself or `stop` fires.
    ///
    /// The timer must already be started; an idle timer returns
    /// [`RunOutcome::Finished`] immediately. Missed periods are delivered
    /// as a burst so the tick count keeps up with elapsed time.
    pub async fn run<T, O>(&self, timer: &mut T, observer: &mut O, mut stop: StopSignal) -> RunOutcome
    where
        T: Ticking,
        O: TimerObserver,
    {
        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);
        let mut stop_open = true;

        loop {
            if !timer.is_running() {
                debug!("driven timer finished");
                return RunOutcome::Finished;
            }
            tokio::select! {
                _ = ticker.tick() => {
                    for event in timer.on_tick() {
                        observer.on_event(&event);
                    }
                }
                changed = stop.rx.changed(), if stop_open => match changed {
                    Ok(()) if *stop.rx.borrow_and_update() => {
                        for event in timer.halt() {
                            observer.on_event(&event);
                        }
                        debug!("driven timer cancelled");
                        return RunOutcome::Cancelled;
                    }
                    Ok(()) => {}
                    // Every handle is gone; only the timer itself can end the run now.
                    Err(_) => stop_open = false,
                },
            }
        }
    }
}

impl Default for TimerDriver {
    fn default() -> Self {
        Self::every_second()
    }
}
