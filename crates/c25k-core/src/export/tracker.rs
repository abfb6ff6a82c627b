//! Fill-in progress sheet. Runners mark `completed` with `Y` as they go; the
//! sheet is read back by [`crate::progress`].

use csv::Writer;
use serde::{Deserialize, Serialize};

use super::{ExportError, finish_csv};
use crate::calendar::session_date;
use crate::plan::{DayLabel, Session};
use crate::profile::UserProfile;

pub fn file_name(profile: &UserProfile) -> String {
    let stem: String = profile
        .name
        .trim()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    let stem = stem.trim_matches('_');
    let stem = if stem.is_empty() { "runner" } else { stem };
    format!("{stem}_progress_tracker.csv")
}

/// One tracker line. Every column except the first three is left for the runner.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrackerRow {
    pub week: u32,
    pub day: String,
    pub date_scheduled: String,
    #[serde(default)]
    pub date_completed: String,
    #[serde(default)]
    pub completed: String,
    #[serde(default)]
    pub effort: String,
    #[serde(default)]
    pub milestone: String,
    #[serde(default)]
    pub weather: String,
    #[serde(default)]
    pub notes: String,
}

pub fn render(sessions: &[Session], profile: &UserProfile) -> Result<String, ExportError> {
    let halfway = profile.weeks.div_ceil(2);
    let mut writer = Writer::from_writer(Vec::new());

    for session in sessions.iter().filter(|session| !session.is_rest()) {
        let last_of_week = matches!(session.day, DayLabel::Index(day) if day == profile.days_per_week);
        let milestone = match (last_of_week, session.week) {
            (true, week) if week == profile.weeks => "C25K complete!",
            (true, 1) => "First week done!",
            (true, week) if week == halfway => "Halfway there!",
            _ => "",
        };
        writer.serialize(TrackerRow {
            week: session.week,
            day: session.day.to_string(),
            date_scheduled: session_date(profile.start_date, session)
                .format("%Y-%m-%d")
                .to_string(),
            milestone: milestone.to_string(),
            weather: session.weather.clone().unwrap_or_default(),
            ..TrackerRow::default()
        })?;
    }
    finish_csv(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::fixtures;

    #[test]
    fn test_file_name_is_filesystem_safe() {
        let mut profile = fixtures::profile();
        assert_eq!(file_name(&profile), "Ana_Lopez_progress_tracker.csv");
        profile.name = "../x".to_string();
        assert_eq!(file_name(&profile), "x_progress_tracker.csv");
    }

    #[test]
    fn test_one_row_per_workout_with_milestones() {
        let mut profile = fixtures::profile();
        profile.weeks = 4;
        let sessions = fixtures::plan(&profile);
        let body = render(&sessions, &profile).unwrap();

        let rows: Vec<TrackerRow> = csv::Reader::from_reader(body.as_bytes())
            .deserialize()
            .map(|row| row.unwrap())
            .collect();
        assert_eq!(rows.len(), 12);
        assert!(rows.iter().all(|row| row.completed.is_empty()));
        assert_eq!(rows[0].date_scheduled, "2025-07-15");

        let milestones: Vec<(u32, &str)> = rows
            .iter()
            .filter(|row| !row.milestone.is_empty())
            .map(|row| (row.week, row.milestone.as_str()))
            .collect();
        assert_eq!(
            milestones,
            vec![
                (1, "First week done!"),
                (2, "Halfway there!"),
                (4, "C25K complete!")
            ]
        );
    }

    #[test]
    fn test_short_plan_keeps_first_week_milestone() {
        let mut profile = fixtures::profile();
        profile.weeks = 2;
        let sessions = fixtures::plan(&profile);
        let body = render(&sessions, &profile).unwrap();

        let milestones: Vec<(u32, String)> = csv::Reader::from_reader(body.as_bytes())
            .deserialize::<TrackerRow>()
            .map(|row| row.unwrap())
            .filter(|row| !row.milestone.is_empty())
            .map(|row| (row.week, row.milestone))
            .collect();
        assert_eq!(
            milestones,
            vec![
                (1, "First week done!".to_string()),
                (2, "C25K complete!".to_string())
            ],
            "week 1 is also the halfway week of a two-week plan"
        );
    }
}
