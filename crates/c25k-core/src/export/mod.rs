//! File renderers for a built plan. Each format is independent; `write_exports`
//! writes the selected ones into the run's output directory.

pub mod google_fit;
pub mod ics;
pub mod json;
pub mod markdown;
pub mod table;
pub mod tracker;
pub mod voice;

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::plan::Session;
use crate::profile::UserProfile;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("rendered output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    Ics,
    Csv,
    Json,
    GoogleFit,
    Markdown,
    Voice,
    Tracker,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 7] = [
        ExportFormat::Ics,
        ExportFormat::Csv,
        ExportFormat::Json,
        ExportFormat::GoogleFit,
        ExportFormat::Markdown,
        ExportFormat::Voice,
        ExportFormat::Tracker,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Ics => "ics",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::GoogleFit => "google-fit",
            ExportFormat::Markdown => "markdown",
            ExportFormat::Voice => "voice",
            ExportFormat::Tracker => "tracker",
        }
    }

    pub fn file_name(self, profile: &UserProfile) -> String {
        match self {
            ExportFormat::Ics => "Couch_to_5K_Reminders.ics".to_string(),
            ExportFormat::Csv => "Couch_to_5K_Reminders.csv".to_string(),
            ExportFormat::Json => "Couch_to_5K_Reminders.json".to_string(),
            ExportFormat::GoogleFit => "Couch_to_5K_GoogleFit.csv".to_string(),
            ExportFormat::Markdown => "Couch_to_5K_Checklist.md".to_string(),
            ExportFormat::Voice => "Couch_to_5K_Voice_Prompts.txt".to_string(),
            ExportFormat::Tracker => tracker::file_name(profile),
        }
    }

    pub fn render(self, sessions: &[Session], profile: &UserProfile) -> Result<String, ExportError> {
        match self {
            ExportFormat::Ics => Ok(ics::render(sessions, profile)),
            ExportFormat::Csv => table::render(sessions, profile),
            ExportFormat::Json => json::render(sessions),
            ExportFormat::GoogleFit => google_fit::render(sessions, profile),
            ExportFormat::Markdown => Ok(markdown::render(sessions, profile)),
            ExportFormat::Voice => Ok(voice::render(sessions, profile)),
            ExportFormat::Tracker => tracker::render(sessions, profile),
        }
    }

    /// Formats whose existing file must be left alone.
    pub fn preserves_existing(self) -> bool {
        matches!(self, ExportFormat::Tracker)
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "i" | "ics" | "ical" | "calendar" => Ok(ExportFormat::Ics),
            "c" | "csv" => Ok(ExportFormat::Csv),
            "j" | "json" => Ok(ExportFormat::Json),
            "g" | "google-fit" | "google_fit" | "googlefit" => Ok(ExportFormat::GoogleFit),
            "m" | "md" | "markdown" | "checklist" => Ok(ExportFormat::Markdown),
            "v" | "voice" => Ok(ExportFormat::Voice),
            "t" | "tracker" | "progress" => Ok(ExportFormat::Tracker),
            other => {
                let known: Vec<&str> = ExportFormat::ALL.iter().map(|f| f.as_str()).collect();
                Err(format!(
                    "unknown export format '{other}' (expected one of: {})",
                    known.join(", ")
                ))
            }
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenExport {
    pub format: ExportFormat,
    pub path: PathBuf,
    /// False when an existing file was kept as-is.
    pub created: bool,
}

/// Render and write each format into `out_dir`, creating the directory first.
pub fn write_exports(
    formats: &[ExportFormat],
    sessions: &[Session],
    profile: &UserProfile,
    out_dir: &Path,
) -> Result<Vec<WrittenExport>, ExportError> {
    fs::create_dir_all(out_dir)?;
    let mut written = Vec::with_capacity(formats.len());

    for &format in formats {
        let path = out_dir.join(format.file_name(profile));
        if format.preserves_existing() && path.exists() {
            info!(format = %format, path = %path.display(), "Keeping existing file");
            written.push(WrittenExport {
                format,
                path,
                created: false,
            });
            continue;
        }

        let body = format.render(sessions, profile)?;
        fs::write(&path, body)?;
        info!(format = %format, path = %path.display(), "Wrote export");
        written.push(WrittenExport {
            format,
            path,
            created: true,
        });
    }

    Ok(written)
}

/// Finish a `csv::Writer` over an in-memory buffer.
pub(crate) fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<String, ExportError> {
    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}
