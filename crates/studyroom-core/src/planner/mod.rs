//! Urgency-weighted timetable planner.
//!
//! Turns a snapshot of subjects into one day of contiguous study (and,
//! in Pomodoro mode, break) blocks starting at a fixed 07:00 anchor:
//! - The daily budget is clamped to 30 minutes ..= 16 hours
//! - Subjects are visited round-robin, most urgent first
//! - Blocks are 25 minutes in Pomodoro mode, up to an hour otherwise
//! - Nearly finished subjects still get at least a 15 minute block

mod timetable;

use std::cmp::Ordering;

use chrono::{Duration, NaiveTime};
use tracing::debug;

use crate::subject::Subject;

pub use timetable::{format_clock, EntryKind, Timetable, TimetableEntry};

/// Below this many hours a subject counts as finished when it is next picked.
const FINISHED_EPSILON_HOURS: f64 = 0.01;

/// Planner constants.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Time of day the first block starts.
    pub day_start: NaiveTime,
    /// Study block length in Pomodoro mode (minutes)
    pub pomodoro_work_minutes: i64,
    /// Break inserted after each Pomodoro block (minutes)
    pub pomodoro_break_minutes: i64,
    /// Longest plain block (minutes)
    pub max_plain_block_minutes: i64,
    /// Shortest block ever emitted; also the budget needed to keep going (minutes)
    pub min_block_minutes: i64,
    /// Daily budget floor (minutes)
    pub min_budget_minutes: f64,
    /// Daily budget ceiling (minutes)
    pub max_budget_minutes: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            day_start: NaiveTime::from_hms_opt(7, 0, 0).unwrap_or_default(),
            pomodoro_work_minutes: 25,
            pomodoro_break_minutes: 5,
            max_plain_block_minutes: 60,
            min_block_minutes: 15,
            min_budget_minutes: 30.0,
            max_budget_minutes: 16.0 * 60.0,
        }
    }
}

impl PlannerConfig {
    /// Force every block to at least a minute and the budget bounds to a
    /// finite, ordered range so generation always terminates.
    fn normalized(self) -> Self {
        let defaults = Self::default();
        let finite_or = |value: f64, fallback: f64| if value.is_finite() { value } else { fallback };
        let min_budget_minutes = finite_or(self.min_budget_minutes, defaults.min_budget_minutes).max(0.0);
        let max_budget_minutes =
            finite_or(self.max_budget_minutes, defaults.max_budget_minutes).max(min_budget_minutes);
        Self {
            day_start: self.day_start,
            pomodoro_work_minutes: self.pomodoro_work_minutes.max(1),
            pomodoro_break_minutes: self.pomodoro_break_minutes.max(0),
            max_plain_block_minutes: self.max_plain_block_minutes.max(1),
            min_block_minutes: self.min_block_minutes.max(1),
            min_budget_minutes,
            max_budget_minutes,
        }
    }
}

/// Per-run bookkeeping for one subject.
#[derive(Debug)]
struct ScheduleTask<'a> {
    subject: &'a Subject,
    remaining_hours: f64,
    weight: f64,
}

impl<'a> ScheduleTask<'a> {
    fn new(subject: &'a Subject) -> Option<Self> {
        let remaining_hours = subject.remaining_hours();
        if remaining_hours <= 0.0 {
            return None;
        }
        Some(Self {
            subject,
            remaining_hours,
            weight: remaining_hours * (1.0 + f64::from(subject.urgency) / 5.0),
        })
    }
}

/// Urgency first, then the initial weight.
fn initial_priority(a: &ScheduleTask<'_>, b: &ScheduleTask<'_>) -> Ordering {
    b.subject
        .urgency
        .cmp(&a.subject.urgency)
        .then_with(|| b.weight.total_cmp(&a.weight))
}

/// Urgency first, then weighted outstanding work. Applied after every block.
fn running_priority(a: &ScheduleTask<'_>, b: &ScheduleTask<'_>) -> Ordering {
    b.subject.urgency.cmp(&a.subject.urgency).then_with(|| {
        (b.weight * b.remaining_hours).total_cmp(&(a.weight * a.remaining_hours))
    })
}

/// Round half up to a whole minute.
fn round_minutes(minutes: f64) -> i64 {
    (minutes + 0.5).floor() as i64
}

/// Timetable planner.
#[derive(Debug, Clone, Default)]
pub struct Planner {
    config: PlannerConfig,
}

impl Planner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use custom constants. Zero or negative block lengths are raised to one
    /// minute and non-finite budget bounds fall back to the defaults.
    pub fn with_config(config: PlannerConfig) -> Self {
        Self {
            config: config.normalized(),
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Minutes actually available for a requested number of daily hours.
    ///
    /// Non-finite and out-of-range requests are clamped; NaN maps to the floor.
    pub fn budget_minutes(&self, daily_hours: f64) -> f64 {
        let requested = daily_hours * 60.0;
        if requested.is_nan() {
            return self.config.min_budget_minutes;
        }
        requested.clamp(self.config.min_budget_minutes, self.config.max_budget_minutes)
    }

    /// Build one day of blocks.
    ///
    /// Returns an empty timetable when there is nothing left to study, whether
    /// because `subjects` is empty or because every subject is complete.
    pub fn generate(
        &self,
        subjects: &[Subject],
        daily_hours: f64,
        use_pomodoro_blocks: bool,
    ) -> Timetable {
        let cfg = &self.config;

        // Index-stable arena; `order` holds the live indices in priority order.
        let mut tasks: Vec<ScheduleTask<'_>> =
            subjects.iter().filter_map(ScheduleTask::new).collect();
        if tasks.is_empty() {
            debug!(subjects = subjects.len(), "nothing left to schedule");
            return Timetable::default();
        }

        let mut available = self.budget_minutes(daily_hours);
        let mut order: Vec<usize> = (0..tasks.len()).collect();
        order.sort_by(|&a, &b| initial_priority(&tasks[a], &tasks[b]));

        let min_block = cfg.min_block_minutes as f64;
        let break_minutes = cfg.pomodoro_break_minutes;
        let mut cursor = cfg.day_start;
        let mut index = 0usize;
        let mut entries = Vec::new();

        while available >= min_block && !order.is_empty() {
            let slot = index % order.len();
            let task = &mut tasks[order[slot]];

            if task.remaining_hours <= FINISHED_EPSILON_HOURS {
                // Re-pick at the same index against the shorter list.
                debug!(subject = %task.subject.name, "subject finished");
                order.remove(slot);
                continue;
            }

            let mut block = if use_pomodoro_blocks {
                cfg.pomodoro_work_minutes
            } else {
                round_minutes(available).min(cfg.max_plain_block_minutes)
            };
            let remaining_minutes = task.remaining_hours * 60.0;
            if remaining_minutes < block as f64 {
                block = round_minutes(remaining_minutes).max(cfg.min_block_minutes);
            }
            if block as f64 > available {
                block = available.floor() as i64;
            }

            let end = cursor + Duration::minutes(block);
            let label = if use_pomodoro_blocks {
                format!("{} (Pomodoro)", task.subject.name)
            } else {
                task.subject.name.clone()
            };
            debug!(subject = %task.subject.name, start = %cursor, minutes = block, "study block");
            entries.push(TimetableEntry {
                start_time: cursor,
                end_time: end,
                label,
                kind: EntryKind::Study,
            });
            cursor = end;
            available -= block as f64;
            task.remaining_hours -= block as f64 / 60.0;

            if use_pomodoro_blocks && break_minutes > 0 && available >= break_minutes as f64 {
                let end = cursor + Duration::minutes(break_minutes);
                entries.push(TimetableEntry {
                    start_time: cursor,
                    end_time: end,
                    label: "Break".to_string(),
                    kind: EntryKind::Break,
                });
                cursor = end;
                available -= break_minutes as f64;
            }

            index += 1;
            order.sort_by(|&a, &b| running_priority(&tasks[a], &tasks[b]));
        }

        debug!(entries = entries.len(), left_over = available, "timetable generated");
        Timetable::new(entries)
    }
}

/// Generate a timetable with the default planner constants.
pub fn generate(subjects: &[Subject], daily_hours: f64, use_pomodoro_blocks: bool) -> Timetable {
    Planner::new().generate(subjects, daily_hours, use_pomodoro_blocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn math_and_art() -> Vec<Subject> {
        vec![
            Subject::new("Math", 10.0, 5, 0.0),
            Subject::new("Art", 4.0, 2, 50.0),
        ]
    }

    #[test]
    fn empty_subjects_yield_empty_timetable() {
        assert!(generate(&[], 4.0, true).is_empty());
    }

    #[test]
    fn completed_subjects_yield_empty_timetable() {
        let subjects = vec![
            Subject::new("Done", 5.0, 3, 100.0),
            Subject::new("Nothing", 0.0, 5, 0.0),
        ];
        assert!(generate(&subjects, 4.0, false).is_empty());
    }

    #[test]
    fn plain_blocks_alternate_by_urgency() {
        let table = generate(&math_and_art(), 4.0, false);
        assert_eq!(
            table.lines(),
            vec![
                "07:00 AM - 08:00 AM | Math",
                "08:00 AM - 09:00 AM | Art",
                "09:00 AM - 10:00 AM | Math",
                "10:00 AM - 11:00 AM | Art",
            ]
        );
    }

    #[test]
    fn pomodoro_mode_fills_budget_with_breaks() {
        let table = generate(&math_and_art(), 4.0, true);
        assert_eq!(table.len(), 16);
        assert_eq!(table.entries()[0].to_string(), "07:00 AM - 07:25 AM | Math (Pomodoro)");
        assert_eq!(table.entries()[1].to_string(), "07:25 AM - 07:30 AM | Break");
        assert_eq!(table.entries()[2].label, "Art (Pomodoro)");
        let last = table.entries().last().unwrap();
        assert_eq!(last.kind, EntryKind::Break);
        assert_eq!(last.end_time, at(11, 0));
        assert_eq!(table.study_minutes(), 200);
        assert_eq!(table.break_minutes(), 40);
    }

    #[test]
    fn nearly_finished_subject_gets_minimum_block() {
        let subjects = vec![Subject::new("Quiz", 0.1, 3, 0.0)];
        let table = generate(&subjects, 1.0, false);
        assert_eq!(table.lines(), vec!["07:00 AM - 07:15 AM | Quiz"]);
    }

    #[test]
    fn finished_subject_is_dropped_without_skipping_the_next() {
        // Quiz drains after one 15 minute block; Essay must pick up every
        // remaining slot.
        let subjects = vec![
            Subject::new("Quiz", 0.25, 5, 0.0),
            Subject::new("Essay", 3.0, 1, 0.0),
        ];
        let table = generate(&subjects, 2.0, false);
        assert_eq!(
            table.lines(),
            vec![
                "07:00 AM - 07:15 AM | Quiz",
                "07:15 AM - 08:15 AM | Essay",
                "08:15 AM - 09:00 AM | Essay",
            ]
        );
    }

    #[test]
    fn negative_hours_use_budget_floor() {
        let subjects = vec![Subject::new("Math", 10.0, 5, 0.0)];
        let table = generate(&subjects, -3.0, false);
        assert_eq!(table.lines(), vec!["07:00 AM - 07:30 AM | Math"]);
    }

    #[test]
    fn huge_hours_use_budget_ceiling() {
        let subjects = vec![Subject::new("Thesis", 40.0, 4, 0.0)];
        let table = generate(&subjects, 1_000.0, false);
        assert_eq!(table.len(), 16);
        assert_eq!(table.entries().last().unwrap().end_time, at(23, 0));
    }

    #[test]
    fn budget_clamps_including_nan() {
        let planner = Planner::new();
        assert_eq!(planner.budget_minutes(0.0), 30.0);
        assert_eq!(planner.budget_minutes(f64::NAN), 30.0);
        assert_eq!(planner.budget_minutes(f64::INFINITY), 960.0);
        assert_eq!(planner.budget_minutes(2.5), 150.0);
    }

    #[test]
    fn equal_urgency_prefers_heavier_subject_first() {
        let subjects = vec![
            Subject::new("Light", 1.0, 3, 0.0),
            Subject::new("Heavy", 5.0, 3, 0.0),
        ];
        let table = generate(&subjects, 1.0, true);
        assert_eq!(table.entries()[0].label, "Heavy (Pomodoro)");
    }

    #[test]
    fn later_picks_weigh_outstanding_work() {
        // After A's first hour, B carries more weighted work and moves ahead,
        // so the second slot lands on A again.
        let subjects = vec![
            Subject::new("A", 2.0, 3, 0.0),
            Subject::new("B", 1.9, 3, 0.0),
        ];
        let table = generate(&subjects, 3.0, false);
        assert_eq!(
            table.lines(),
            vec![
                "07:00 AM - 08:00 AM | A",
                "08:00 AM - 09:00 AM | A",
                "09:00 AM - 10:00 AM | B",
            ]
        );
    }

    #[test]
    fn degenerate_config_still_terminates() {
        let planner = Planner::with_config(PlannerConfig {
            pomodoro_work_minutes: 0,
            pomodoro_break_minutes: -5,
            max_plain_block_minutes: 0,
            min_block_minutes: 0,
            min_budget_minutes: f64::NAN,
            max_budget_minutes: f64::INFINITY,
            ..PlannerConfig::default()
        });
        let subjects = vec![Subject::new("Math", 2.0, 3, 0.0)];

        let plain = planner.generate(&subjects, 1.0, false);
        assert_eq!(plain.len(), 60);
        assert!(plain.iter().all(|e| e.duration_minutes() == 1));

        let pomodoro = planner.generate(&subjects, 1.0, true);
        assert!(pomodoro.iter().all(|e| e.kind == EntryKind::Study));
        assert_eq!(pomodoro.study_minutes(), 60);
    }

    #[test]
    fn round_minutes_is_half_up() {
        assert_eq!(round_minutes(14.5), 15);
        assert_eq!(round_minutes(14.49), 14);
        assert_eq!(round_minutes(59.9), 60);
    }
}
