use csv::Writer;
use serde::Serialize;

use super::{ExportError, finish_csv};
use crate::calendar::session_date;
use crate::plan::Session;
use crate::profile::UserProfile;

#[derive(Debug, Serialize)]
struct Row<'a> {
    week: u32,
    day: String,
    date: String,
    duration: u32,
    description: &'a str,
    workout: &'a str,
    tip: &'a str,
    weather: Option<&'a str>,
}

pub fn render(sessions: &[Session], profile: &UserProfile) -> Result<String, ExportError> {
    let mut writer = Writer::from_writer(Vec::new());
    for session in sessions {
        writer.serialize(Row {
            week: session.week,
            day: session.day.to_string(),
            date: session_date(profile.start_date, session)
                .format("%Y-%m-%d")
                .to_string(),
            duration: session.duration,
            description: &session.description,
            workout: &session.workout,
            tip: &session.tip,
            weather: session.weather.as_deref(),
        })?;
    }
    finish_csv(writer)
}
