//! Turns a validated [`UserProfile`] into the ordered list of calendar sessions.
//!
//! Workouts are spread evenly through each week (`i * (7 / days_per_week)`),
//! remaining slots that fall on a rest weekday become zero-length rest
//! sessions, and everything is returned sorted by `(week, day_offset)`.

use std::fmt;

use chrono::{Datelike, Duration, Weekday};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::content::{self, NarrativeContext};
use crate::profile::UserProfile;
use crate::weather::ForecastSource;

pub const DEFAULT_DURATION_MINUTES: u32 = 30;
pub const REDUCED_DURATION_MINUTES: u32 = 25;

/// Workouts carry their sequential day number, rest days their weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DayLabel {
    Index(u32),
    Weekday(Weekday),
}

impl fmt::Display for DayLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayLabel::Index(day) => write!(f, "{day}"),
            DayLabel::Weekday(weekday) => write!(f, "{weekday}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub week: u32,
    pub day: DayLabel,
    pub day_offset: u32,
    /// Minutes; zero marks a rest day.
    pub duration: u32,
    pub description: String,
    pub workout: String,
    pub tip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
}

impl Session {
    pub fn is_rest(&self) -> bool {
        self.duration == 0
    }
}

pub struct PlanBuilder<'a> {
    profile: &'a UserProfile,
    forecast: Option<&'a dyn ForecastSource>,
}

impl<'a> PlanBuilder<'a> {
    pub fn new(profile: &'a UserProfile) -> Self {
        Self {
            profile,
            forecast: None,
        }
    }

    /// Annotate the first workout with a forecast for the profile's location.
    pub fn with_forecast(mut self, source: &'a dyn ForecastSource) -> Self {
        self.forecast = Some(source);
        self
    }

    pub fn build(&self) -> Vec<Session> {
        let profile = self.profile;
        let spacing = 7 / profile.days_per_week;
        let reduced = profile.needs_reduced_sessions();
        let mut sessions = Vec::with_capacity((profile.weeks * 7) as usize);

        for week in 1..=profile.weeks {
            let workout_offsets: Vec<u32> =
                (0..profile.days_per_week).map(|i| i * spacing).collect();

            for (i, &offset) in workout_offsets.iter().enumerate() {
                sessions.push(self.workout_session(week, i as u32 + 1, offset, reduced));
            }

            for offset in 0..7u32 {
                if workout_offsets.contains(&offset) {
                    continue;
                }
                let weekday = (profile.start_date + Duration::days(i64::from(offset))).weekday();
                if profile.is_rest_day(weekday) {
                    sessions.push(self.rest_session(week, offset, weekday));
                }
            }
        }

        sessions.sort_by_key(|session| (session.week, session.day_offset));

        if let (Some(source), Some(location)) = (self.forecast, profile.location.as_deref()) {
            if let Some(first) = sessions.iter_mut().find(|session| !session.is_rest()) {
                let date = crate::calendar::session_date(profile.start_date, first);
                first.weather = Some(source.forecast(location, date));
            }
        }

        debug!(
            weeks = profile.weeks,
            days_per_week = profile.days_per_week,
            sessions = sessions.len(),
            reduced,
            "Built training plan"
        );
        sessions
    }

    fn workout_session(&self, week: u32, day: u32, offset: u32, reduced: bool) -> Session {
        let profile = self.profile;
        let locale = profile.locale;
        let workout = content::workout_for_week(week, locale);
        let tip = content::tip_for_day(i64::from(day), locale);
        let ctx = NarrativeContext {
            week,
            gender: profile.gender,
            age: profile.age,
            weight_kg: profile.weight_kg,
            session_time: profile.session_time,
        };
        let mut description = content::workout_narrative(&ctx, workout, tip, locale);
        let duration = if reduced {
            description.push_str(content::safety_note(locale));
            REDUCED_DURATION_MINUTES
        } else {
            DEFAULT_DURATION_MINUTES
        };

        Session {
            week,
            day: DayLabel::Index(day),
            day_offset: offset,
            duration,
            description,
            workout: workout.to_string(),
            tip: tip.to_string(),
            weather: None,
        }
    }

    fn rest_session(&self, week: u32, offset: u32, weekday: Weekday) -> Session {
        let locale = self.profile.locale;
        Session {
            week,
            day: DayLabel::Weekday(weekday),
            day_offset: offset,
            duration: 0,
            description: content::rest_narrative(week, weekday, locale),
            workout: content::rest_label(locale).to_string(),
            tip: content::tip_for_day(i64::from(offset), locale).to_string(),
            weather: None,
        }
    }
}

pub fn build_plan(profile: &UserProfile) -> Vec<Session> {
    PlanBuilder::new(profile).build()
}
