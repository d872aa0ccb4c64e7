use std::time::Duration;

use clap::Args;
use studyroom_core::{Config, Event, PomodoroSequencer, RunOutcome, TimerDriver};

use super::{ctrl_c_stop, print_event, CommandResult};

#[derive(Args)]
pub struct PomodoroArgs {
    /// Work minutes per round (default: pomodoro.work_minutes)
    #[arg(long, allow_negative_numbers = true)]
    pub work: Option<i64>,
    /// Break minutes between rounds (default: pomodoro.break_minutes)
    #[arg(long = "break", allow_negative_numbers = true)]
    pub break_minutes: Option<i64>,
    /// Number of work rounds (default: pomodoro.rounds)
    #[arg(long, allow_negative_numbers = true)]
    pub rounds: Option<i64>,
    /// Tick every millisecond instead of every second
    #[arg(long)]
    pub fast: bool,
    /// Print events as JSON lines
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: PomodoroArgs) -> CommandResult {
    let config = Config::load_or_default();
    let work = args.work.unwrap_or(config.pomodoro.work_minutes);
    let break_minutes = args.break_minutes.unwrap_or(config.pomodoro.break_minutes);
    let rounds = args.rounds.unwrap_or(config.pomodoro.rounds);

    let mut sequencer = PomodoroSequencer::new();
    let json = args.json;
    let mut observer = |event: &Event| print_event(event, json);
    for event in sequencer.start(work, break_minutes, rounds) {
        observer(&event);
    }

    let driver = if args.fast {
        TimerDriver::new(Duration::from_millis(1))
    } else {
        TimerDriver::every_second()
    };
    let (_handle, signal) = ctrl_c_stop();
    let outcome = driver.run(&mut sequencer, &mut observer, signal).await;

    if outcome == RunOutcome::Cancelled && !json {
        println!();
        println!("Pomodoro stopped");
    }
    Ok(())
}
