use std::time::Duration;

use clap::Args;
use studyroom_core::{Event, ManualTimer, TimerDriver};

use super::{ctrl_c_stop, print_event, CommandResult};

#[derive(Args)]
pub struct StopwatchArgs {
    /// Stop automatically after this many seconds (default: run until Ctrl-C)
    #[arg(long)]
    pub seconds: Option<u64>,
    /// Print events as JSON lines
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: StopwatchArgs) -> CommandResult {
    let mut timer = ManualTimer::new();
    let json = args.json;
    let mut observer = |event: &Event| print_event(event, json);
    for event in timer.start() {
        observer(&event);
    }

    let (handle, signal) = ctrl_c_stop();
    if let Some(secs) = args.seconds {
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(secs)).await;
            handle.stop();
        });
    }

    TimerDriver::every_second()
        .run(&mut timer, &mut observer, signal)
        .await;
    Ok(())
}
