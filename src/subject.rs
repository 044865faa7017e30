//! Subject records and the form-level checks applied before they reach the
//! engine.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::engine::Graded;
use crate::error::{ValidationError, ValidationErrors};

pub const MIN_GRADE: f64 = 0.0;
pub const MAX_GRADE: f64 = 5.0;

/// A validated course record without an id. Also the calculator request item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectEntry {
    pub name: String,
    pub grade: f64,
    pub credits: u32,
}

/// A course record held in a [`crate::roster::SubjectList`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub grade: f64,
    pub credits: u32,
}

impl Subject {
    pub fn new(entry: SubjectEntry) -> Self {
        Self {
            id: generate_subject_id(),
            name: entry.name,
            grade: entry.grade,
            credits: entry.credits,
        }
    }

    /// `grade × credits` for this subject alone.
    pub fn weighted(&self) -> f64 {
        self.grade * f64::from(self.credits)
    }

    pub fn entry(&self) -> SubjectEntry {
        SubjectEntry {
            name: self.name.clone(),
            grade: self.grade,
            credits: self.credits,
        }
    }
}

impl Graded for Subject {
    fn grade(&self) -> f64 {
        self.grade
    }

    fn credits(&self) -> f64 {
        f64::from(self.credits)
    }
}

impl Graded for SubjectEntry {
    fn grade(&self) -> f64 {
        self.grade
    }

    fn credits(&self) -> f64 {
        f64::from(self.credits)
    }
}

/// Raw, unvalidated subject fields as typed by the user.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubjectDraft {
    pub name: String,
    pub grade: String,
    pub credits: String,
}

impl SubjectDraft {
    pub fn new(name: impl Into<String>, grade: impl Into<String>, credits: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            grade: grade.into(),
            credits: credits.into(),
        }
    }

    /// Checks every field and reports all failures at once.
    ///
    /// The name is trimmed; the grade must lie in `[0, 5]`; credits must be a
    /// whole number greater than zero.
    pub fn validate(&self) -> Result<SubjectEntry, ValidationErrors> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push(ValidationError::MissingName);
        }

        let grade = self
            .grade
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|g| (MIN_GRADE..=MAX_GRADE).contains(g));
        if grade.is_none() {
            errors.push(ValidationError::InvalidGrade);
        }

        let credits = self
            .credits
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|c| *c > 0);
        if credits.is_none() {
            errors.push(ValidationError::InvalidCredits);
        }

        match (grade, credits) {
            (Some(grade), Some(credits)) if errors.is_empty() => Ok(SubjectEntry {
                name: name.to_string(),
                grade,
                credits,
            }),
            _ => Err(ValidationErrors(errors)),
        }
    }
}

static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Returns an id unique within this process: the current time in
/// milliseconds followed by a base-36 sequence number.
pub fn generate_subject_id() -> String {
    let seq = ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}{}", Utc::now().timestamp_millis(), to_base36(seq))
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut out = Vec::new();
    loop {
        out.push(char::from(DIGITS[(n % 36) as usize]));
        n /= 36;
        if n == 0 {
            break;
        }
    }
    out.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_valid_draft() {
        let entry = SubjectDraft::new("  Calculus ", "4.5", "3").validate().unwrap();
        assert_eq!(entry.name, "Calculus");
        assert_eq!(entry.grade, 4.5);
        assert_eq!(entry.credits, 3);
    }

    #[test]
    fn test_grade_bounds_are_inclusive() {
        assert!(SubjectDraft::new("A", "0", "1").validate().is_ok());
        assert!(SubjectDraft::new("A", "5", "1").validate().is_ok());
        assert!(SubjectDraft::new("A", "5.01", "1").validate().is_err());
        assert!(SubjectDraft::new("A", "-0.1", "1").validate().is_err());
    }

    #[test]
    fn test_reports_every_failing_field() {
        let errors = SubjectDraft::new("   ", "abc", "0").validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::MissingName));
        assert!(errors.contains(&ValidationError::InvalidGrade));
        assert!(errors.contains(&ValidationError::InvalidCredits));
    }

    #[test]
    fn test_rejects_non_numeric_and_fractional_credits() {
        for credits in ["", "x", "2.5", "-3"] {
            let errors = SubjectDraft::new("Physics", "3", credits).validate().unwrap_err();
            assert_eq!(errors.0, vec![ValidationError::InvalidCredits], "credits {credits:?}");
        }
    }

    #[test]
    fn test_rejects_nan_grade() {
        let errors = SubjectDraft::new("Physics", "NaN", "2").validate().unwrap_err();
        assert_eq!(errors.0, vec![ValidationError::InvalidGrade]);
    }

    #[test]
    fn test_subject_weighted() {
        let subject = Subject::new(SubjectEntry {
            name: "Chemistry".into(),
            grade: 3.5,
            credits: 4,
        });
        assert_eq!(subject.weighted(), 14.0);
        assert_eq!(subject.entry().name, "Chemistry");
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let ids: HashSet<String> = (0..500).map(|_| generate_subject_id()).collect();
        assert_eq!(ids.len(), 500);
    }

    #[test]
    fn test_to_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }
}
