use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use crate::plan::Session;
use crate::profile::UserProfile;

/// Start date used when the runner does not pick one.
pub fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 15).unwrap_or(NaiveDate::MIN)
}

/// How the plan's first day is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOption {
    Default,
    NextMonday,
    Date(NaiveDate),
}

impl StartOption {
    pub fn resolve(self, today: NaiveDate) -> NaiveDate {
        match self {
            StartOption::Default => default_start_date(),
            StartOption::NextMonday => next_monday(today),
            StartOption::Date(date) => date,
        }
    }
}

impl FromStr for StartOption {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" | "default" => Ok(StartOption::Default),
            "next-monday" | "next_monday" | "monday" => Ok(StartOption::NextMonday),
            _ => NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .map(StartOption::Date)
                .map_err(|err| format!("invalid start date '{trimmed}': {err}")),
        }
    }
}

impl fmt::Display for StartOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartOption::Default => f.write_str("default"),
            StartOption::NextMonday => f.write_str("next-monday"),
            StartOption::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

pub fn resolve_start_date(option: &str, today: NaiveDate) -> Result<NaiveDate, String> {
    option.parse::<StartOption>().map(|start| start.resolve(today))
}

/// The Monday strictly after `today`.
pub fn next_monday(today: NaiveDate) -> NaiveDate {
    let days_ahead = 7 - i64::from(today.weekday().num_days_from_monday());
    today + Duration::days(days_ahead)
}

/// Where a session lands on the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub date: NaiveDate,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

pub fn session_date(start_date: NaiveDate, session: &Session) -> NaiveDate {
    start_date
        + Duration::weeks(i64::from(session.week.saturating_sub(1)))
        + Duration::days(i64::from(session.day_offset))
}

pub fn place(profile: &UserProfile, session: &Session) -> Placement {
    let date = session_date(profile.start_date, session);
    let start = date.and_time(profile.session_time);
    Placement {
        date,
        start,
        end: start + Duration::minutes(i64::from(session.duration)),
    }
}

/// Per-run directory name: `<name>-<age>-<start date>`.
pub fn output_dir_name(profile: &UserProfile) -> String {
    let name: String = profile
        .name
        .trim()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('_'),
            c if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' => Some(c),
            _ => None,
        })
        .collect();
    let name = name.trim_matches('.');
    let name = if name.is_empty() { "runner" } else { name };
    format!(
        "{name}-{}-{}",
        profile.age,
        profile.start_date.format("%Y-%m-%d")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::DayLabel;
    use crate::profile::{Gender, Locale};
    use chrono::{NaiveTime, Weekday};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn profile(name: &str) -> UserProfile {
        UserProfile {
            name: name.to_string(),
            age: 30,
            weight_kg: 70.0,
            gender: Gender::Male,
            locale: Locale::En,
            weeks: 10,
            days_per_week: 3,
            rest_days: vec![Weekday::Sat, Weekday::Sun],
            start_date: date(2025, 7, 15),
            session_time: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
            alert_minutes: 30,
            email: None,
            location: None,
            goal: None,
            timezone: "America/New_York".to_string(),
        }
    }

    fn session(week: u32, offset: u32, duration: u32) -> Session {
        Session {
            week,
            day: DayLabel::Index(offset + 1),
            day_offset: offset,
            duration,
            description: String::new(),
            workout: String::new(),
            tip: String::new(),
            weather: None,
        }
    }

    #[test]
    fn test_next_monday_is_strictly_after_today() {
        // 2025-07-14 is a Monday.
        assert_eq!(next_monday(date(2025, 7, 14)), date(2025, 7, 21));
        assert_eq!(next_monday(date(2025, 7, 15)), date(2025, 7, 21));
        assert_eq!(next_monday(date(2025, 7, 20)), date(2025, 7, 21));
    }

    #[test]
    fn test_resolve_start_date_options() {
        let today = date(2025, 1, 1);
        assert_eq!(resolve_start_date("default", today), Ok(date(2025, 7, 15)));
        assert_eq!(resolve_start_date("", today), Ok(date(2025, 7, 15)));
        assert_eq!(resolve_start_date("next-monday", today), Ok(date(2025, 1, 6)));
        assert_eq!(resolve_start_date("2026-03-02", today), Ok(date(2026, 3, 2)));
        assert!(resolve_start_date("03/02/2026", today).is_err());
    }

    #[test]
    fn test_placement_adds_weeks_offset_and_duration() {
        let profile = profile("Sam");
        let placed = place(&profile, &session(10, 4, 30));
        assert_eq!(placed.date, date(2025, 9, 20));
        assert_eq!(placed.start, date(2025, 9, 20).and_hms_opt(7, 0, 0).unwrap());
        assert_eq!(placed.end, date(2025, 9, 20).and_hms_opt(7, 30, 0).unwrap());

        let rest = place(&profile, &session(1, 5, 0));
        assert_eq!(rest.start, rest.end, "rest days have no length");
    }

    #[test]
    fn test_output_dir_name_sanitizes() {
        assert_eq!(output_dir_name(&profile("Ana Maria")), "Ana_Maria-30-2025-07-15");
        assert_eq!(output_dir_name(&profile("../etc/x")), "etcx-30-2025-07-15");
        assert_eq!(output_dir_name(&profile("///")), "runner-30-2025-07-15");
    }

    #[test]
    fn test_start_option_display_round_trips() {
        for raw in ["default", "next-monday", "2025-08-04"] {
            let parsed: StartOption = raw.parse().unwrap();
            assert_eq!(parsed.to_string(), raw);
        }
    }
}
