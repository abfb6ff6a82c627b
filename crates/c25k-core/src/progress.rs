use std::fs::File;
use std::io;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

use crate::export::tracker::TrackerRow;

#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("failed to open progress file: {0}")]
    Io(#[from] io::Error),
    #[error("malformed progress file: {0}")]
    Csv(#[from] csv::Error),
}

/// Read a progress tracker. A file that does not exist yet reads as empty,
/// and rows whose cells no longer parse are skipped.
pub fn import_progress(path: &Path) -> Result<Vec<TrackerRow>, ProgressError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No progress file yet");
            return Ok(Vec::new());
        }
        Err(err) => return Err(err.into()),
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);
    let mut rows = Vec::new();
    for row in reader.deserialize::<TrackerRow>() {
        match row {
            Ok(row) => rows.push(row),
            // Hand edits can break a cell; keep the rows that still parse.
            Err(err) if matches!(err.kind(), csv::ErrorKind::Deserialize { .. }) => {
                warn!(path = %path.display(), error = %err, "Skipping unreadable progress row");
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(rows)
}

pub fn is_completed(row: &TrackerRow) -> bool {
    matches!(row.completed.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

pub fn summarize(rows: &[TrackerRow]) -> String {
    if rows.is_empty() {
        return "No progress data found.".to_string();
    }
    let total = rows.len();
    let completed = rows.iter().filter(|row| is_completed(row)).count();
    let percent = completed as f64 / total as f64 * 100.0;
    format!("Progress: {completed}/{total} sessions completed ({percent:.1}%).")
}
