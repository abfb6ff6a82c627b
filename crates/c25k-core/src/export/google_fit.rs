//! CSV shaped for import into Google Calendar / Google Fit activity lists.

use csv::Writer;
use serde::Serialize;

use super::{ExportError, finish_csv, ics};
use crate::calendar::place;
use crate::plan::Session;
use crate::profile::UserProfile;

const DATE_FORMAT: &str = "%m/%d/%Y";
const TIME_FORMAT: &str = "%I:%M %p";

#[derive(Debug, Serialize)]
struct Row<'a> {
    #[serde(rename = "Activity Type")]
    activity_type: &'static str,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Start Date")]
    start_date: String,
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Date")]
    end_date: String,
    #[serde(rename = "End Time")]
    end_time: String,
    #[serde(rename = "All Day Event")]
    all_day: &'static str,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Tip")]
    tip: &'a str,
}

pub fn render(sessions: &[Session], profile: &UserProfile) -> Result<String, ExportError> {
    let mut writer = Writer::from_writer(Vec::new());
    for session in sessions {
        let placed = place(profile, session);
        let row = if session.is_rest() {
            Row {
                activity_type: "Rest",
                title: ics::summary(session),
                start_date: placed.date.format(DATE_FORMAT).to_string(),
                start_time: String::new(),
                end_date: placed.date.format(DATE_FORMAT).to_string(),
                end_time: String::new(),
                all_day: "True",
                description: &session.workout,
                tip: &session.tip,
            }
        } else {
            Row {
                activity_type: "Running",
                title: ics::summary(session),
                start_date: placed.start.format(DATE_FORMAT).to_string(),
                start_time: placed.start.format(TIME_FORMAT).to_string(),
                end_date: placed.end.format(DATE_FORMAT).to_string(),
                end_time: placed.end.format(TIME_FORMAT).to_string(),
                all_day: "False",
                description: &session.workout,
                tip: &session.tip,
            }
        };
        writer.serialize(row)?;
    }
    finish_csv(writer)
}
