use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Study,
    Break,
}

/// One contiguous block of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableEntry {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub label: String,
    pub kind: EntryKind,
}

impl TimetableEntry {
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }
}

/// 12-hour clock rendering used throughout the timetable, e.g. `07:25 AM`.
pub fn format_clock(time: NaiveTime) -> String {
    time.format("%I:%M %p").to_string()
}

impl fmt::Display for TimetableEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} | {}",
            format_clock(self.start_time),
            format_clock(self.end_time),
            self.label
        )
    }
}

/// A generated day, in chronological order. Owned by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timetable {
    entries: Vec<TimetableEntry>,
}

impl Timetable {
    pub(crate) fn new(entries: Vec<TimetableEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[TimetableEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<TimetableEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimetableEntry> {
        self.entries.iter()
    }

    /// Rendered `"<start> - <end> | <label>"` lines.
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }

    pub fn study_minutes(&self) -> i64 {
        self.minutes_of(EntryKind::Study)
    }

    pub fn break_minutes(&self) -> i64 {
        self.minutes_of(EntryKind::Break)
    }

    fn minutes_of(&self, kind: EntryKind) -> i64 {
        self.entries
            .iter()
            .filter(|e| e.kind == kind)
            .map(TimetableEntry::duration_minutes)
            .sum()
    }
}

impl fmt::Display for Timetable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Timetable {
    type Item = &'a TimetableEntry;
    type IntoIter = std::slice::Iter<'a, TimetableEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for Timetable {
    type Item = TimetableEntry;
    type IntoIter = std::vec::IntoIter<TimetableEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
