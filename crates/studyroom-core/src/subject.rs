//! Study subjects and the sources that provide them.
//!
//! The planner only ever reads a snapshot of subjects. Where the subjects
//! live is up to the caller: anything implementing [`SubjectSource`] will do.
//! [`SubjectSheet`] is the file-backed source the CLI uses.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result, ValidationError};

/// A unit of study work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
    /// Planned total hours.
    pub hours_needed: f64,
    /// 1 (relaxed) ..= 5 (urgent).
    pub urgency: u8,
    #[serde(default)]
    pub completion_percent: f64,
}

impl Subject {
    pub fn new(name: impl Into<String>, hours_needed: f64, urgency: u8, completion_percent: f64) -> Self {
        Self {
            name: name.into(),
            hours_needed,
            urgency,
            completion_percent,
        }
    }

    /// Hours still to study, never negative.
    pub fn remaining_hours(&self) -> f64 {
        (self.hours_needed * (1.0 - self.completion_percent / 100.0)).max(0.0)
    }

    /// Check the invariants a subject store is expected to uphold.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::invalid("name", "must not be empty"));
        }
        if !self.hours_needed.is_finite() || self.hours_needed < 0.0 {
            return Err(ValidationError::invalid(
                "hours_needed",
                format!("{} must be a non-negative number ({})", self.hours_needed, self.name),
            ));
        }
        if !(1..=5).contains(&self.urgency) {
            return Err(ValidationError::invalid(
                "urgency",
                format!("{} must be between 1 and 5 ({})", self.urgency, self.name),
            ));
        }
        if !(0.0..=100.0).contains(&self.completion_percent) {
            return Err(ValidationError::invalid(
                "completion_percent",
                format!("{} must be between 0 and 100 ({})", self.completion_percent, self.name),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} — {:.1}h | U:{} | {:.0}%",
            self.name, self.hours_needed, self.urgency, self.completion_percent
        )
    }
}

/// Anything that can hand the planner a read-only snapshot of subjects.
pub trait SubjectSource {
    fn snapshot(&self) -> Vec<Subject>;
}

impl SubjectSource for Vec<Subject> {
    fn snapshot(&self) -> Vec<Subject> {
        self.clone()
    }
}

impl SubjectSource for [Subject] {
    fn snapshot(&self) -> Vec<Subject> {
        self.to_vec()
    }
}

/// TOML layout: a list of `[[subject]]` tables.
#[derive(Debug, Default, Serialize, Deserialize)]
struct TomlSheet {
    #[serde(default)]
    subject: Vec<Subject>,
}

/// Subjects loaded from a JSON or TOML file.
#[derive(Debug, Clone, Default)]
pub struct SubjectSheet {
    subjects: Vec<Subject>,
}

impl SubjectSheet {
    pub fn new(subjects: Vec<Subject>) -> Result<Self> {
        for subject in &subjects {
            subject.validate()?;
        }
        Ok(Self { subjects })
    }

    /// Load a sheet, picking the format from the file extension.
    ///
    /// `.json` files hold an array of subjects, `.toml` files a list of
    /// `[[subject]]` tables.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "json" => Self::from_json(&content),
            "toml" => Self::from_toml(&content),
            other => Err(CoreError::Validation(ValidationError::UnsupportedFormat(
                if other.is_empty() {
                    path.display().to_string()
                } else {
                    format!(".{other}")
                },
            ))),
        }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let subjects: Vec<Subject> = serde_json::from_str(content)?;
        Self::new(subjects)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let sheet: TomlSheet = toml::from_str(content)?;
        Self::new(sheet.subject)
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

impl SubjectSource for SubjectSheet {
    fn snapshot(&self) -> Vec<Subject> {
        self.subjects.clone()
    }
}
