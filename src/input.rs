//! Reading subject records from the command line and from CSV files.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use tracing::debug;

use crate::subject::{SubjectDraft, SubjectEntry};

/// Parses `NAME:GRADE:CREDITS`.
///
/// Grade and credits are split from the right, so the name may contain `:`.
pub fn parse_inline(arg: &str) -> Result<SubjectDraft> {
    let mut parts = arg.rsplitn(3, ':');
    let credits = parts.next();
    let grade = parts.next();
    let name = parts.next();

    match (name, grade, credits) {
        (Some(name), Some(grade), Some(credits)) => Ok(SubjectDraft::new(name, grade, credits)),
        _ => bail!("expected NAME:GRADE:CREDITS, got {arg:?}"),
    }
}

/// Reads drafts from CSV with a `name,grade,credits` header.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<SubjectDraft>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut drafts = Vec::new();
    for (i, row) in rdr.deserialize::<SubjectDraft>().enumerate() {
        // Row 1 is the header.
        drafts.push(row.with_context(|| format!("invalid CSV row {}", i + 2))?);
    }
    Ok(drafts)
}

#[tracing::instrument(skip(path), fields(path = %path.display()))]
pub fn read_csv_file(path: &Path) -> Result<Vec<SubjectDraft>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let drafts = read_csv(file)?;
    debug!(rows = drafts.len(), "Subjects read from CSV");
    Ok(drafts)
}

/// Validates every draft, naming each rejected one by position and name.
pub fn validate_all(drafts: &[SubjectDraft]) -> Result<Vec<SubjectEntry>> {
    let mut entries = Vec::with_capacity(drafts.len());
    let mut failures = Vec::new();

    for (i, draft) in drafts.iter().enumerate() {
        match draft.validate() {
            Ok(entry) => entries.push(entry),
            Err(errors) => failures.push(format!(
                "subject #{} ({:?}): {}",
                i + 1,
                draft.name.trim(),
                errors
            )),
        }
    }

    if !failures.is_empty() {
        return Err(anyhow!(failures.join("\n")));
    }
    Ok(entries)
}
