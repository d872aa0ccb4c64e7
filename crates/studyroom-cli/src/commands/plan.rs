use std::path::PathBuf;

use clap::Args;
use studyroom_core::{Config, Planner, SubjectSheet, SubjectSource, Timetable};

use super::CommandResult;

#[derive(Args)]
pub struct PlanArgs {
    /// Subject sheet (.json or .toml)
    pub sheet: PathBuf,
    /// Study hours for the day (default: planner.daily_hours)
    #[arg(long, allow_negative_numbers = true)]
    pub hours: Option<f64>,
    /// Use 25 minute blocks with 5 minute breaks
    #[arg(long, conflicts_with = "plain")]
    pub pomodoro: bool,
    /// Use plain blocks of up to an hour
    #[arg(long)]
    pub plain: bool,
    /// Print the timetable as JSON
    #[arg(long)]
    pub json: bool,
}

/// One-line outcome shown after generation.
pub fn summary(subject_count: usize, table: &Timetable) -> String {
    if subject_count == 0 {
        "No subjects to schedule.".to_string()
    } else if table.is_empty() {
        "All subjects show no remaining hours.".to_string()
    } else {
        format!("Timetable generated. Total study blocks: {}", table.len())
    }
}

pub fn run(args: PlanArgs) -> CommandResult {
    let config = Config::load_or_default();
    let sheet = SubjectSheet::load(&args.sheet)?;
    let subjects = sheet.snapshot();

    let daily_hours = args.hours.unwrap_or(config.planner.daily_hours);
    let use_pomodoro_blocks = if args.pomodoro {
        true
    } else if args.plain {
        false
    } else {
        config.planner.use_pomodoro_blocks
    };

    let planner = Planner::new();
    tracing::debug!(
        daily_hours,
        budget_minutes = planner.budget_minutes(daily_hours),
        use_pomodoro_blocks,
        "generating timetable"
    );
    let table = planner.generate(&subjects, daily_hours, use_pomodoro_blocks);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    print!("{table}");
    println!("{}", summary(subjects.len(), &table));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use studyroom_core::{generate, Subject};

    #[test]
    fn summary_distinguishes_empty_cases() {
        assert_eq!(summary(0, &Timetable::default()), "No subjects to schedule.");
        assert_eq!(
            summary(2, &Timetable::default()),
            "All subjects show no remaining hours."
        );
    }

    #[test]
    fn summary_counts_entries() {
        let subjects = vec![Subject::new("Math", 1.0, 3, 0.0)];
        let table = generate(&subjects, 1.0, true);
        assert_eq!(summary(1, &table), "Timetable generated. Total study blocks: 4");
    }
}
