//! Output formatting and persistence for grade summaries.
//!
//! Supports a human-readable report, JSON serialization, and CSV append.

use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use tracing::{debug, info};

use crate::engine::GradeSummary;
use crate::roster::SubjectList;
use crate::standing::Standing;

/// Where a summary came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Local,
    Remote,
}

/// One row of the CSV history file.
#[derive(Debug, Serialize)]
pub struct SummaryRecord {
    pub timestamp: DateTime<Utc>,
    pub source: Source,
    pub subjects: usize,
    pub weighted_sum: f64,
    pub total_credits: f64,
    pub average: f64,
    pub standing: Standing,
}

impl SummaryRecord {
    pub fn new(summary: &GradeSummary, subjects: usize, source: Source) -> Self {
        Self {
            timestamp: Utc::now(),
            source,
            subjects,
            weighted_sum: summary.weighted_sum,
            total_credits: summary.total_credits,
            average: summary.average,
            standing: Standing::from_average(summary.average),
        }
    }
}

/// Logs a summary using Rust's debug pretty-print format.
pub fn print_pretty(summary: &GradeSummary) {
    debug!("{:#?}", summary);
}

/// Renders a summary as pretty-printed JSON.
pub fn to_json(summary: &GradeSummary) -> Result<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}

/// Renders the summary the way the calculator screen shows it.
pub fn render_report(summary: &GradeSummary) -> String {
    if !summary.has_credits() {
        return "No subjects yet. Add subjects to see your average.".to_string();
    }

    let standing = Standing::from_average(summary.average);
    let mut out = String::new();
    let _ = writeln!(out, "Average:       {:.2} ({})", summary.average, standing);
    let _ = writeln!(out, "Weighted sum:  {:.2}", summary.weighted_sum);
    let _ = writeln!(out, "Total credits: {}", summary.total_credits);
    let _ = write!(
        out,
        "Formula:       {:.2} ÷ {} = {:.2}",
        summary.weighted_sum, summary.total_credits, summary.average
    );
    out
}

/// One line per subject: name, grade, credits and weighted grade.
pub fn render_subjects(list: &SubjectList) -> String {
    if list.is_empty() {
        return "No subjects added yet.".to_string();
    }

    let mut out = format!("Subjects ({})", list.len());
    for subject in list.iter() {
        let _ = write!(
            out,
            "\n  {:<24} grade {:<5} credits {:<3} weighted {:.2}",
            subject.name,
            subject.grade,
            subject.credits,
            subject.weighted()
        );
    }
    out
}

/// Appends a [`SummaryRecord`] as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &Path, record: &SummaryRecord) -> Result<()> {
    let file_exists = path.exists();
    debug!(path = %path.display(), file_exists, "Appending CSV record");

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(record)?;
    writer.flush()?;

    info!(path = %path.display(), average = record.average, "Summary appended to history");
    Ok(())
}
