//! Integration tests for timetable generation.
//!
//! Covers the full path from a subject sheet to rendered timetable lines,
//! plus property checks over arbitrary subject sets and budgets.

use chrono::NaiveTime;
use proptest::prelude::*;
use studyroom_core::{generate, EntryKind, Planner, Subject, SubjectSheet, SubjectSource};

fn seven_am() -> NaiveTime {
    NaiveTime::from_hms_opt(7, 0, 0).unwrap()
}

#[test]
fn test_sheet_to_timetable() {
    let sheet = SubjectSheet::from_toml(
        r#"
        [[subject]]
        name = "Math"
        hours_needed = 10.0
        urgency = 5

        [[subject]]
        name = "Art"
        hours_needed = 4.0
        urgency = 2
        completion_percent = 50.0
        "#,
    )
    .unwrap();

    let table = generate(&sheet.snapshot(), 4.0, false);
    let first = &table.entries()[0];
    assert_eq!(first.label, "Math");
    assert_eq!(first.start_time, seven_am());
    assert_eq!(first.to_string(), "07:00 AM - 08:00 AM | Math");
    assert_eq!(table.study_minutes(), 240);
}

#[test]
fn test_fully_complete_sheet_is_empty() {
    let subjects = vec![
        Subject::new("History", 6.0, 4, 100.0),
        Subject::new("Latin", 2.0, 1, 100.0),
    ];
    for pomodoro in [true, false] {
        assert!(generate(&subjects, 8.0, pomodoro).is_empty());
    }
}

#[test]
fn test_urgency_beats_workload() {
    let subjects = vec![
        Subject::new("Huge", 30.0, 1, 0.0),
        Subject::new("Urgent", 1.0, 5, 0.0),
    ];
    let table = generate(&subjects, 3.0, false);
    assert_eq!(table.entries()[0].label, "Urgent");
    assert_eq!(table.entries()[1].label, "Huge");
}

#[test]
fn test_output_is_json_serializable() {
    let subjects = vec![Subject::new("Math", 1.0, 3, 0.0)];
    let table = generate(&subjects, 1.0, true);
    let json = serde_json::to_value(&table).unwrap();
    let entries = json.as_array().unwrap();
    assert_eq!(entries[0]["kind"], "study");
    assert_eq!(entries[0]["start_time"], "07:00:00");
    assert_eq!(entries[1]["kind"], "break");
}

fn subject_strategy() -> impl Strategy<Value = Subject> {
    ("[A-Z][a-z]{1,8}", 0.0f64..20.0, 1u8..=5, 0.0f64..=100.0)
        .prop_map(|(name, hours, urgency, done)| Subject::new(name, hours, urgency, done))
}

proptest! {
    #[test]
    fn budget_is_always_clamped(hours in prop_oneof![
        any::<f64>(),
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
        -100.0f64..100.0,
    ]) {
        let budget = Planner::new().budget_minutes(hours);
        prop_assert!((30.0..=960.0).contains(&budget));
    }

    #[test]
    fn entries_are_contiguous_and_within_budget(
        subjects in prop::collection::vec(subject_strategy(), 0..6),
        hours in -5.0f64..30.0,
        pomodoro in any::<bool>(),
    ) {
        let planner = Planner::new();
        let table = planner.generate(&subjects, hours, pomodoro);

        if let Some(first) = table.entries().first() {
            prop_assert_eq!(first.start_time, seven_am());
        }
        for entry in table.iter() {
            prop_assert!(entry.end_time > entry.start_time);
        }
        for pair in table.entries().windows(2) {
            prop_assert_eq!(pair[0].end_time, pair[1].start_time);
        }
        let used = (table.study_minutes() + table.break_minutes()) as f64;
        prop_assert!(used <= planner.budget_minutes(hours));
    }

    #[test]
    fn pomodoro_study_blocks_are_followed_by_breaks(
        subjects in prop::collection::vec(subject_strategy(), 1..5),
        hours in 0.0f64..16.0,
    ) {
        let table = generate(&subjects, hours, true);
        let entries = table.entries();
        for (i, entry) in entries.iter().enumerate() {
            match entry.kind {
                EntryKind::Study => {
                    prop_assert!(entry.label.ends_with(" (Pomodoro)"));
                    if let Some(next) = entries.get(i + 1) {
                        prop_assert_eq!(next.kind, EntryKind::Break);
                    }
                }
                EntryKind::Break => {
                    prop_assert_eq!(entry.duration_minutes(), 5);
                    prop_assert!(i > 0 && entries[i - 1].kind == EntryKind::Study);
                }
            }
        }
    }

    #[test]
    fn plain_mode_has_no_breaks_and_caps_blocks(
        subjects in prop::collection::vec(subject_strategy(), 1..5),
        hours in 0.0f64..16.0,
    ) {
        let table = generate(&subjects, hours, false);
        for entry in table.iter() {
            prop_assert_eq!(entry.kind, EntryKind::Study);
            prop_assert!(entry.duration_minutes() >= 15);
            prop_assert!(entry.duration_minutes() <= 60);
        }
    }

    #[test]
    fn completed_subjects_never_scheduled(
        names in prop::collection::vec("[a-z]{3,6}", 0..5),
        hours in -5.0f64..30.0,
        pomodoro in any::<bool>(),
    ) {
        let subjects: Vec<Subject> = names
            .into_iter()
            .map(|n| Subject::new(n, 3.0, 3, 100.0))
            .collect();
        prop_assert!(generate(&subjects, hours, pomodoro).is_empty());
    }
}
