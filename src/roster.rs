//! In-memory list of the subjects entered during one session.

use tracing::debug;

use crate::contract::CalculationPayload;
use crate::engine::{GradeSummary, compute_summary};
use crate::subject::{Subject, SubjectEntry};

/// Ordered subjects keyed by their generated id.
#[derive(Debug, Default, Clone)]
pub struct SubjectList {
    subjects: Vec<Subject>,
}

impl SubjectList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a subject and returns the id it was given.
    pub fn add(&mut self, entry: SubjectEntry) -> String {
        let subject = Subject::new(entry);
        let id = subject.id.clone();
        debug!(id = %id, name = %subject.name, "Subject added");
        self.subjects.push(subject);
        id
    }

    /// Removes the subject with `id`. Returns `false` if no such subject.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.subjects.len();
        self.subjects.retain(|s| s.id != id);
        let removed = self.subjects.len() != before;
        debug!(id, removed, "Subject remove requested");
        removed
    }

    pub fn clear(&mut self) {
        self.subjects.clear();
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Subject> {
        self.subjects.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    pub fn summary(&self) -> GradeSummary {
        compute_summary(&self.subjects)
    }

    /// Builds the calculator request for the current subjects.
    pub fn payload(&self) -> CalculationPayload {
        CalculationPayload {
            subjects: self.subjects.iter().map(Subject::entry).collect(),
        }
    }
}

impl FromIterator<SubjectEntry> for SubjectList {
    fn from_iter<I: IntoIterator<Item = SubjectEntry>>(iter: I) -> Self {
        let mut list = SubjectList::new();
        for entry in iter {
            list.add(entry);
        }
        list
    }
}
