use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar::StartOption;

pub const LBS_TO_KG: f64 = 0.453592;
pub const MIN_AGE: u32 = 5;
pub const MAX_AGE: u32 = 120;
pub const MIN_WEIGHT: f64 = 30.0;
pub const MAX_WEIGHT: f64 = 500.0;
pub const MAX_WEEKS: u32 = 52;
pub const MAX_ALERT_MINUTES: u32 = 1440;
pub const DEFAULT_WEEKS: u32 = 10;
pub const DEFAULT_DAYS_PER_WEEK: u32 = 3;
pub const DEFAULT_ALERT_MINUTES: u32 = 30;
pub const DEFAULT_SESSION_TIME: &str = "07:00";
pub const DEFAULT_TIMEZONE: &str = "America/New_York";

/// Age at which sessions are shortened.
pub const SAFETY_AGE_YEARS: u32 = 60;
/// Normalized weight at which sessions are shortened.
pub const SAFETY_WEIGHT_KG: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "m" | "male" => Ok(Gender::Male),
            "f" | "female" => Ok(Gender::Female),
            "o" | "other" => Ok(Gender::Other),
            other => Err(format!(
                "unknown gender '{other}' (expected male, female or other)"
            )),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "e" | "en" | "english" => Ok(Locale::En),
            "s" | "es" | "spanish" | "español" => Ok(Locale::Es),
            other => Err(format!("unknown locale '{other}' (expected en or es)")),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Locale::En => "en",
            Locale::Es => "es",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Metric,
    #[default]
    Imperial,
}

impl WeightUnit {
    pub fn to_kg(self, value: f64) -> f64 {
        match self {
            WeightUnit::Metric => value,
            WeightUnit::Imperial => value * LBS_TO_KG,
        }
    }
}

impl FromStr for WeightUnit {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "m" | "metric" | "kg" => Ok(WeightUnit::Metric),
            "i" | "imperial" | "lb" | "lbs" => Ok(WeightUnit::Imperial),
            other => Err(format!(
                "unknown unit system '{other}' (expected metric or imperial)"
            )),
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WeightUnit::Metric => "metric",
            WeightUnit::Imperial => "imperial",
        })
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    #[error("name must not be empty")]
    MissingName,
    #[error("age is required")]
    MissingAge,
    #[error("age {0} is outside {min}..={max}", min = MIN_AGE, max = MAX_AGE)]
    AgeOutOfRange(u32),
    #[error("weight is required")]
    MissingWeight,
    #[error("weight {0} is outside {min}..={max}", min = MIN_WEIGHT, max = MAX_WEIGHT)]
    WeightOutOfRange(f64),
    #[error("gender is required (male, female or other)")]
    MissingGender,
    #[error("session time '{0}' is not a valid HH:MM time")]
    InvalidSessionTime(String),
    #[error("weeks {0} is outside 1..={max}", max = MAX_WEEKS)]
    WeeksOutOfRange(u32),
    #[error("days per week {0} is outside 1..=7")]
    DaysPerWeekOutOfRange(u32),
    #[error("alert lead time {0} minutes is outside 0..={max}", max = MAX_ALERT_MINUTES)]
    AlertOutOfRange(u32),
    #[error("'{0}' is not a weekday name")]
    InvalidRestDay(String),
    #[error("start date '{0}' must be 'default', 'next-monday' or YYYY-MM-DD")]
    InvalidStartDate(String),
    #[error("unknown timezone '{0}'")]
    UnknownTimezone(String),
}

/// Raw, unvalidated profile values as they arrive from config and flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileInput {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub weight: Option<f64>,
    pub units: WeightUnit,
    pub gender: Option<Gender>,
    pub locale: Locale,
    pub weeks: u32,
    pub days_per_week: u32,
    pub rest_days: Vec<String>,
    pub start: String,
    pub session_time: String,
    pub alert_minutes: u32,
    pub email: Option<String>,
    pub location: Option<String>,
    pub goal: Option<String>,
    pub timezone: String,
}

impl Default for ProfileInput {
    fn default() -> Self {
        Self {
            name: None,
            age: None,
            weight: None,
            units: WeightUnit::default(),
            gender: None,
            locale: Locale::default(),
            weeks: DEFAULT_WEEKS,
            days_per_week: DEFAULT_DAYS_PER_WEEK,
            rest_days: default_rest_days(),
            start: StartOption::Default.to_string(),
            session_time: DEFAULT_SESSION_TIME.to_string(),
            alert_minutes: DEFAULT_ALERT_MINUTES,
            email: None,
            location: None,
            goal: None,
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

pub fn default_rest_days() -> Vec<String> {
    vec!["Sat".to_string(), "Sun".to_string()]
}

impl ProfileInput {
    /// Check every field and produce the immutable profile used for planning.
    ///
    /// `today` anchors the `next-monday` start option.
    pub fn validate(&self, today: NaiveDate) -> Result<UserProfile, ProfileError> {
        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(ProfileError::MissingName)?
            .to_string();

        let age = self.age.ok_or(ProfileError::MissingAge)?;
        if !(MIN_AGE..=MAX_AGE).contains(&age) {
            return Err(ProfileError::AgeOutOfRange(age));
        }

        let weight = self.weight.ok_or(ProfileError::MissingWeight)?;
        if !weight.is_finite() || !(MIN_WEIGHT..=MAX_WEIGHT).contains(&weight) {
            return Err(ProfileError::WeightOutOfRange(weight));
        }

        let gender = self.gender.ok_or(ProfileError::MissingGender)?;

        if !(1..=MAX_WEEKS).contains(&self.weeks) {
            return Err(ProfileError::WeeksOutOfRange(self.weeks));
        }
        if !(1..=7).contains(&self.days_per_week) {
            return Err(ProfileError::DaysPerWeekOutOfRange(self.days_per_week));
        }
        if self.alert_minutes > MAX_ALERT_MINUTES {
            return Err(ProfileError::AlertOutOfRange(self.alert_minutes));
        }

        let session_time = parse_session_time(&self.session_time)
            .ok_or_else(|| ProfileError::InvalidSessionTime(self.session_time.clone()))?;

        let mut rest_days = Vec::with_capacity(self.rest_days.len());
        for raw in &self.rest_days {
            let day = parse_weekday(raw).ok_or_else(|| ProfileError::InvalidRestDay(raw.clone()))?;
            if !rest_days.contains(&day) {
                rest_days.push(day);
            }
        }

        let start_date = self
            .start
            .parse::<StartOption>()
            .map_err(|_| ProfileError::InvalidStartDate(self.start.clone()))?
            .resolve(today);

        let timezone = self.timezone.trim();
        if timezone.parse::<Tz>().is_err() {
            return Err(ProfileError::UnknownTimezone(self.timezone.clone()));
        }

        Ok(UserProfile {
            name,
            age,
            weight_kg: self.units.to_kg(weight),
            gender,
            locale: self.locale,
            weeks: self.weeks,
            days_per_week: self.days_per_week,
            rest_days,
            start_date,
            session_time,
            alert_minutes: self.alert_minutes,
            email: non_empty(self.email.as_deref()),
            location: non_empty(self.location.as_deref()),
            goal: non_empty(self.goal.as_deref()),
            timezone: timezone.to_string(),
        })
    }
}

/// A validated runner profile. Built once per run.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    pub weight_kg: f64,
    pub gender: Gender,
    pub locale: Locale,
    pub weeks: u32,
    pub days_per_week: u32,
    pub rest_days: Vec<Weekday>,
    pub start_date: NaiveDate,
    pub session_time: NaiveTime,
    pub alert_minutes: u32,
    pub email: Option<String>,
    pub location: Option<String>,
    pub goal: Option<String>,
    pub timezone: String,
}

impl UserProfile {
    pub fn needs_reduced_sessions(&self) -> bool {
        self.age >= SAFETY_AGE_YEARS || self.weight_kg >= SAFETY_WEIGHT_KG
    }

    pub fn is_rest_day(&self, weekday: Weekday) -> bool {
        self.rest_days.contains(&weekday)
    }
}

/// Parses `H:MM` or `HH:MM`.
pub fn parse_session_time(value: &str) -> Option<NaiveTime> {
    let (hour, minute) = value.trim().split_once(':')?;
    let hour: u32 = hour.trim().parse().ok()?;
    let minute: u32 = minute.trim().parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Accepts short or long English weekday names in any case.
pub fn parse_weekday(value: &str) -> Option<Weekday> {
    value.trim().parse::<Weekday>().ok()
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
