//! Integration tests for the Pomodoro sequencer and the manual timer.
//!
//! Drives both timers the way a display loop would: one tick per simulated
//! second, every event inspected.

use studyroom_core::timer::session_summary;
use studyroom_core::{
    stop_channel, Config, Event, ManualTimer, PomodoroSequencer, RunOutcome, SegmentKind,
    SteppedClock, TimerDriver, TimerSource, TimerState,
};

fn count_completions(events: &[Event]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, Event::PomodoroCompleted { .. }))
        .count()
}

#[test]
fn test_default_pomodoro_run() {
    let mut seq = PomodoroSequencer::new();
    let start = seq.start(25, 5, 3);
    assert_eq!(start[0].display_text(), Some("25:00"));

    let mut all = Vec::new();
    let mut completed_at = None;
    for tick in 1..=5100u32 {
        let events = seq.tick();
        if count_completions(&events) > 0 {
            assert!(completed_at.is_none(), "second completion at tick {tick}");
            completed_at = Some(tick);
        }
        all.extend(events);
    }

    assert_eq!(completed_at, Some(5100));
    assert_eq!(count_completions(&all), 1);

    let advanced: Vec<(usize, SegmentKind)> = all
        .iter()
        .filter_map(|e| match e {
            Event::SegmentAdvanced { segment_index, kind, .. } => Some((*segment_index, *kind)),
            _ => None,
        })
        .collect();
    assert_eq!(
        advanced,
        vec![
            (1, SegmentKind::Break),
            (2, SegmentKind::Work),
            (3, SegmentKind::Break),
            (4, SegmentKind::Work),
        ]
    );

    // Nothing more happens once the plan is done.
    assert!(seq.tick().is_empty());
    assert!(seq.stop().is_empty());
}

#[test]
fn test_pomodoro_display_payload() {
    let mut seq = PomodoroSequencer::new();
    seq.start(2, 1, 2);
    let events = seq.tick();
    match &events[0] {
        Event::Display(update) => {
            assert_eq!(update.source, TimerSource::Pomodoro);
            assert_eq!(update.state, TimerState::Running);
            assert_eq!(update.seconds, 119);
            assert_eq!(update.segment, Some(SegmentKind::Work));
            assert_eq!(update.formatted, "01:59");
        }
        other => panic!("Expected Display, got {other:?}"),
    }
}

#[test]
fn test_pomodoro_completion_reports_completed_state() {
    let mut seq = PomodoroSequencer::new();
    seq.start(1, 1, 1);
    let mut last = Vec::new();
    for _ in 0..60 {
        last = seq.tick();
    }
    let states: Vec<TimerState> = last
        .iter()
        .filter_map(|e| match e {
            Event::Display(update) => Some(update.state),
            _ => None,
        })
        .collect();
    assert_eq!(states, vec![TimerState::Completed]);
    assert!(last.last().is_some_and(Event::is_terminal));
    assert_eq!(seq.state(), TimerState::Idle);
}

#[test]
fn test_pomodoro_from_config_defaults() {
    let cfg = Config::default();
    let mut seq = PomodoroSequencer::new();
    seq.start(
        cfg.pomodoro.work_minutes,
        cfg.pomodoro.break_minutes,
        cfg.pomodoro.rounds,
    );
    assert_eq!(seq.plan().len(), 7);
    assert_eq!(seq.plan().total_secs(), (4 * 25 + 3 * 5) * 60);
}

#[test]
fn test_manual_timer_session() {
    let clock = SteppedClock::new();
    let mut timer = ManualTimer::with_clock(clock.clone());

    let start = timer.start();
    assert_eq!(start[0].display_text(), Some("00:00:00"));

    let mut last_display = String::new();
    for _ in 0..125 {
        clock.advance(1);
        for event in timer.tick() {
            if let Some(text) = event.display_text() {
                last_display = text.to_string();
            }
        }
    }
    assert_eq!(last_display, "00:02:05");

    let stop = timer.stop();
    assert_eq!(stop.elapsed_secs, 125);
    assert_eq!(session_summary(stop.elapsed_secs), "You studied productively for 00:02:05");
    assert_eq!(stop.events.iter().filter(|e| e.is_terminal()).count(), 1);

    let again = timer.stop();
    assert_eq!(again.elapsed_secs, 0);
    assert!(again.events.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_driver_runs_short_plan() {
    let mut seq = PomodoroSequencer::new();
    seq.start(1, 1, 2);
    let (_handle, signal) = stop_channel();
    let mut completions = 0;
    let mut ticks_seen = 0;
    let mut observer = |e: &Event| match e {
        Event::PomodoroCompleted { .. } => completions += 1,
        Event::Display(_) => ticks_seen += 1,
        _ => {}
    };

    let outcome = TimerDriver::every_second()
        .run(&mut seq, &mut observer, signal)
        .await;

    assert_eq!(outcome, RunOutcome::Finished);
    assert_eq!(completions, 1);
    // One display per tick, plus a reload display for each advanced segment.
    assert_eq!(ticks_seen, 180 + 2);
}
