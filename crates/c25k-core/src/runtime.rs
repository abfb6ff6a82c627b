use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{Local, NaiveDate};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::calendar::output_dir_name;
use crate::config::DEFAULT_OUTPUT_ROOT;
use crate::export::{self, ExportError, ExportFormat, WrittenExport};
use crate::plan::{PlanBuilder, Session};
use crate::profile::{ProfileError, ProfileInput, UserProfile};
use crate::progress;
use crate::reminders::{
    Delivery, OutboxTransport, ReminderError, ReminderTransport, SmtpSettings, compose_reminder,
};
use crate::weather::{ForecastSource, OpenMeteoClient, WeatherEndpoints};

/// Everything one run needs, after config and flags are merged.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    pub profile: ProfileInput,
    pub formats: Vec<ExportFormat>,
    pub output_root: String,
    pub weather: bool,
    pub dry_run: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            profile: ProfileInput::default(),
            formats: vec![ExportFormat::Ics],
            output_root: DEFAULT_OUTPUT_ROOT.to_string(),
            weather: true,
            dry_run: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("invalid profile: {0}")]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("failed to prepare output directory: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Reminder(#[from] ReminderError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub profile: UserProfile,
    pub output_dir: PathBuf,
    pub sessions: Vec<Session>,
    /// Target paths in write order; populated on dry runs too.
    pub planned: Vec<PathBuf>,
    /// Empty on dry runs.
    pub exports: Vec<WrittenExport>,
    pub reminder: Option<Delivery>,
    pub progress: Option<String>,
    pub dry_run: bool,
}

impl RunReport {
    pub fn workout_count(&self) -> usize {
        self.sessions.iter().filter(|session| !session.is_rest()).count()
    }

    pub fn weather(&self) -> Option<&str> {
        self.sessions
            .iter()
            .find_map(|session| session.weather.as_deref())
    }
}

/// Stage timings, logged at debug level.
struct StageTimer {
    program_start: Instant,
    stage_start: Instant,
}

impl StageTimer {
    fn new() -> Self {
        let now = Instant::now();
        Self {
            program_start: now,
            stage_start: now,
        }
    }

    fn begin(&mut self, stage: &str) {
        self.stage_start = Instant::now();
        debug!(stage, elapsed_ms = format_ms(self.program_start), "BEGIN");
    }

    fn end(&mut self, stage: &str) {
        debug!(
            stage,
            elapsed_ms = format_ms(self.program_start),
            stage_ms = format_ms(self.stage_start),
            "END"
        );
    }
}

fn format_ms(since: Instant) -> String {
    format!("{:.3}", since.elapsed().as_secs_f64() * 1_000.0)
}

/// The user's selection plus the always-written checklist and tracker.
pub fn resolve_formats(selected: &[ExportFormat]) -> Vec<ExportFormat> {
    let mut formats: Vec<ExportFormat> = Vec::with_capacity(selected.len() + 2);
    for &format in selected
        .iter()
        .chain([ExportFormat::Markdown, ExportFormat::Tracker].iter())
    {
        if !formats.contains(&format) {
            formats.push(format);
        }
    }
    formats
}

pub fn resolve_output_dir(root: &str, profile: &UserProfile) -> PathBuf {
    let root = shellexpand::tilde(root.trim()).to_string();
    Path::new(&root).join(output_dir_name(profile))
}

/// Generate a plan for today's date, fetching a forecast when enabled.
pub fn run(config: &PlannerConfig) -> Result<RunReport, RunError> {
    let today = Local::now().date_naive();
    let wants_weather = config.weather
        && config
            .profile
            .location
            .as_deref()
            .is_some_and(|location| !location.trim().is_empty());

    let client = if wants_weather && !config.dry_run {
        match OpenMeteoClient::new(WeatherEndpoints::from_env()) {
            Ok(client) => Some(client),
            Err(err) => {
                warn!(error = %err, "Weather client unavailable; continuing without forecast");
                None
            }
        }
    } else {
        None
    };

    run_with(
        config,
        today,
        client.as_ref().map(|client| client as &dyn ForecastSource),
    )
}

pub fn run_with(
    config: &PlannerConfig,
    today: NaiveDate,
    forecast: Option<&dyn ForecastSource>,
) -> Result<RunReport, RunError> {
    let mut timer = StageTimer::new();

    timer.begin("Validate profile");
    let profile = config.profile.validate(today)?;
    timer.end("Validate profile");

    timer.begin("Build plan");
    let mut builder = PlanBuilder::new(&profile);
    if let Some(source) = forecast {
        builder = builder.with_forecast(source);
    }
    let sessions = builder.build();
    timer.end("Build plan");

    let output_dir = resolve_output_dir(&config.output_root, &profile);
    let formats = resolve_formats(&config.formats);
    let planned: Vec<PathBuf> = formats
        .iter()
        .map(|format| output_dir.join(format.file_name(&profile)))
        .collect();

    if config.dry_run {
        for path in &planned {
            info!(path = %path.display(), "Dry run: would write");
        }
        if profile.email.is_some() {
            info!("Dry run: would save a reminder email");
        }
        return Ok(RunReport {
            profile,
            output_dir,
            sessions,
            planned,
            exports: Vec::new(),
            reminder: None,
            progress: None,
            dry_run: true,
        });
    }

    timer.begin("Write exports");
    let exports = export::write_exports(&formats, &sessions, &profile, &output_dir)?;
    timer.end("Write exports");

    let reminder = match (&profile.email, sessions.iter().find(|s| !s.is_rest())) {
        (Some(email), Some(first)) => {
            timer.begin("Send reminder");
            let message = compose_reminder(&profile, first, email);
            let transport = OutboxTransport::new(&output_dir, SmtpSettings::from_env());
            let delivery = transport.deliver(&message)?;
            timer.end("Send reminder");
            Some(delivery)
        }
        _ => None,
    };

    let tracker_path = output_dir.join(ExportFormat::Tracker.file_name(&profile));
    let rows = match progress::import_progress(&tracker_path) {
        Ok(rows) => rows,
        Err(err) => {
            warn!(path = %tracker_path.display(), error = %err, "Progress tracker unreadable");
            Vec::new()
        }
    };
    let summary = progress::summarize(&rows);
    info!(summary = %summary, "Progress");

    Ok(RunReport {
        profile,
        output_dir,
        sessions,
        planned,
        exports,
        reminder,
        progress: Some(summary),
        dry_run: false,
    })
}
