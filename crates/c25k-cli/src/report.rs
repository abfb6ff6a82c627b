use std::fmt::Write;

use c25k_core::RunReport;
use c25k_core::calendar::place;
use c25k_core::reminders::Delivery;

/// Human-readable summary printed after a run.
pub fn render(report: &RunReport) -> String {
    let mut out = String::new();
    let workouts = report.workout_count();
    let rest = report.sessions.len() - workouts;

    if report.dry_run {
        let _ = writeln!(out, "Dry run: nothing was written.");
    }
    let _ = writeln!(
        out,
        "Plan for {}: {} weeks, {} workouts, {} rest days.",
        report.profile.name, report.profile.weeks, workouts, rest
    );
    if let Some(first) = report.sessions.iter().find(|session| !session.is_rest()) {
        let placed = place(&report.profile, first);
        let _ = writeln!(
            out,
            "First session: {} ({} minutes).",
            placed.start.format("%a %Y-%m-%d %H:%M"),
            first.duration
        );
    }

    if report.dry_run {
        let _ = writeln!(out, "Would write to {}:", report.output_dir.display());
        for path in &report.planned {
            let _ = writeln!(out, "  {}", path.display());
        }
    } else {
        let _ = writeln!(out, "Files in {}:", report.output_dir.display());
        for export in &report.exports {
            let note = if export.created { "" } else { " (kept existing)" };
            let _ = writeln!(out, "  {}{note}", export.path.display());
        }
    }

    if let Some(weather) = report.weather() {
        let _ = writeln!(out, "{weather}");
    }
    if let Some(Delivery::Outbox(path)) = &report.reminder {
        let _ = writeln!(out, "Reminder saved to {}", path.display());
    }
    if let Some(progress) = &report.progress {
        let _ = writeln!(out, "{progress}");
    }
    out
}
