pub mod config;
pub mod plan;
pub mod pomodoro;
pub mod stopwatch;
pub mod subjects;

use std::io::Write;

use studyroom_core::{stop_channel, Event, StopHandle, StopSignal};

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Stop channel whose handle also fires on Ctrl-C.
pub(crate) fn ctrl_c_stop() -> (StopHandle, StopSignal) {
    let (handle, signal) = stop_channel();
    let on_interrupt = handle.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.stop();
        }
    });
    (handle, signal)
}

/// Print one timer event, either as a JSON line or for a terminal.
pub(crate) fn print_event(event: &Event, json: bool) {
    if json {
        match serde_json::to_string(event) {
            Ok(line) => println!("{line}"),
            Err(e) => tracing::warn!("could not encode event: {e}"),
        }
        return;
    }
    match event {
        Event::Display(update) => {
            write_display(&mut std::io::stdout(), &update.formatted);
        }
        Event::SegmentAdvanced { kind, duration_secs, .. } => {
            println!();
            println!("{kind:?} for {}", studyroom_core::timer::format_countdown(*duration_secs));
        }
        Event::PomodoroCompleted { .. } => {
            println!();
            println!("Pomodoro complete! Great job");
        }
        Event::ManualTimerStopped { elapsed_secs, .. } => {
            println!();
            println!("{}", studyroom_core::timer::session_summary(*elapsed_secs));
        }
    }
}

/// Overwrite the current terminal line with `text`. Returns whether the
/// write reached the terminal; failures are logged, not fatal.
fn write_display(out: &mut impl Write, text: &str) -> bool {
    let written = write!(out, "\r{text}   ").and_then(|()| out.flush());
    if let Err(e) = &written {
        tracing::warn!("could not write display: {e}");
    }
    written.is_ok()
}
