use std::cell::RefCell;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use tempfile::tempdir;

use c25k_core::export::tracker::TrackerRow;
use c25k_core::reminders::Delivery;
use c25k_core::{
    ExportFormat, ForecastSource, Gender, PlannerConfig, ProfileInput, WeightUnit, run_with,
};

struct FixedForecast {
    calls: RefCell<Vec<(String, NaiveDate)>>,
}

impl ForecastSource for FixedForecast {
    fn forecast(&self, location: &str, date: NaiveDate) -> String {
        self.calls.borrow_mut().push((location.to_string(), date));
        "Forecast: 61-74°F, rain likely, rainy.".to_string()
    }
}

fn config(root: &Path) -> PlannerConfig {
    PlannerConfig {
        profile: ProfileInput {
            name: Some("Ana Lopez".to_string()),
            age: Some(38),
            weight: Some(68.0),
            units: WeightUnit::Metric,
            gender: Some(Gender::Female),
            email: Some("ana@example.com".to_string()),
            location: Some("Boston".to_string()),
            ..ProfileInput::default()
        },
        formats: ExportFormat::ALL.to_vec(),
        output_root: root.display().to_string(),
        ..PlannerConfig::default()
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 1).expect("valid date")
}

#[test]
fn pipeline_writes_every_format_with_forecast_and_reminder() {
    let temp = tempdir().expect("tempdir");
    let forecast = FixedForecast {
        calls: RefCell::new(Vec::new()),
    };

    let report = run_with(&config(temp.path()), today(), Some(&forecast)).expect("run");

    assert_eq!(
        forecast.calls.borrow().as_slice(),
        &[(
            "Boston".to_string(),
            NaiveDate::from_ymd_opt(2025, 7, 15).unwrap()
        )]
    );
    assert_eq!(report.output_dir, temp.path().join("Ana_Lopez-38-2025-07-15"));
    assert_eq!(report.exports.len(), ExportFormat::ALL.len());
    for export in &report.exports {
        assert!(export.created);
        let body = fs::read_to_string(&export.path).expect("read export");
        assert!(!body.is_empty(), "{} is empty", export.path.display());
    }

    let json = fs::read_to_string(report.output_dir.join("Couch_to_5K_Reminders.json")).unwrap();
    assert!(json.contains("rain likely"));

    let ics = fs::read_to_string(report.output_dir.join("Couch_to_5K_Reminders.ics")).unwrap();
    assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
    assert_eq!(ics.matches("BEGIN:VEVENT").count(), report.sessions.len());

    let Some(Delivery::Outbox(eml)) = report.reminder.clone() else {
        panic!("expected an outbox reminder, got {:?}", report.reminder);
    };
    let message = fs::read_to_string(eml).unwrap();
    assert!(message.contains("To: ana@example.com\r\n"));
    assert!(message.contains("Rain is expected."));
    assert_eq!(
        report.progress.as_deref(),
        Some("Progress: 0/30 sessions completed (0.0%).")
    );
}

#[test]
fn rerun_keeps_tracker_and_reports_progress() {
    let temp = tempdir().expect("tempdir");
    let mut cfg = config(temp.path());
    cfg.formats = vec![ExportFormat::Csv];
    cfg.profile.email = None;
    cfg.weather = false;

    let first = run_with(&cfg, today(), None).expect("first run");
    let tracker = first
        .exports
        .iter()
        .find(|export| export.format == ExportFormat::Tracker)
        .map(|export| export.path.clone())
        .expect("tracker written");
    assert!(tracker.ends_with("Ana_Lopez_progress_tracker.csv"));

    let mut reader = csv::Reader::from_path(&tracker).unwrap();
    let mut rows: Vec<TrackerRow> = reader.deserialize().map(Result::unwrap).collect();
    for row in rows.iter_mut().take(3) {
        row.completed = "Y".to_string();
        row.date_completed = row.date_scheduled.clone();
    }
    let mut writer = csv::Writer::from_path(&tracker).unwrap();
    for row in &rows {
        writer.serialize(row).unwrap();
    }
    writer.flush().unwrap();

    let second = run_with(&cfg, today(), None).expect("second run");
    let kept = second
        .exports
        .iter()
        .find(|export| export.format == ExportFormat::Tracker)
        .unwrap();
    assert!(!kept.created, "tracker must not be overwritten");
    assert_eq!(
        second.progress.as_deref(),
        Some("Progress: 3/30 sessions completed (10.0%).")
    );
    assert!(second.reminder.is_none());
}

#[test]
fn rerun_survives_a_damaged_tracker() {
    let temp = tempdir().expect("tempdir");
    let mut cfg = config(temp.path());
    cfg.formats = vec![ExportFormat::Ics];
    cfg.profile.email = None;
    cfg.weather = false;

    let first = run_with(&cfg, today(), None).expect("first run");
    let tracker = first.output_dir.join("Ana_Lopez_progress_tracker.csv");
    let body = fs::read_to_string(&tracker).unwrap();
    let damaged = body.replacen("\n1,1,", "\nWeek 1,1,", 1);
    assert_ne!(body, damaged, "first data row starts with week 1 day 1");
    fs::write(&tracker, damaged).unwrap();

    let second = run_with(&cfg, today(), None).expect("damaged tracker must not fail the run");
    assert!(second.output_dir.join("Couch_to_5K_Reminders.ics").exists());
    assert_eq!(
        second.progress.as_deref(),
        Some("Progress: 0/29 sessions completed (0.0%).")
    );
}
