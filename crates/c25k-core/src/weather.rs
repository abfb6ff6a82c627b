//! Forecast lookup for the first workout, plus the text heuristics that decide
//! whether a reminder should warn about the weather.
//!
//! Lookups never fail the run: every error collapses into a short
//! `Weather: ...` string that is shown in place of a forecast.

use std::env;
use std::sync::OnceLock;
use std::time::Duration;

use chrono::NaiveDate;
use regex::Regex;
use reqwest::blocking::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

pub const LOCATION_NOT_FOUND: &str = "Weather: location not found.";
pub const FORECAST_UNAVAILABLE: &str = "Weather: forecast unavailable.";

/// Anything that can turn a location and a date into display text.
pub trait ForecastSource {
    fn forecast(&self, location: &str, date: NaiveDate) -> String;
}

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("location not found")]
    LocationNotFound,
    #[error("no forecast for the requested day")]
    NoForecast,
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    #[error("service responded with {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherEndpoints {
    pub geocoding_url: String,
    pub forecast_url: String,
}

impl Default for WeatherEndpoints {
    fn default() -> Self {
        Self {
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
        }
    }
}

impl WeatherEndpoints {
    /// Defaults, overridden by `C25K_GEOCODING_URL` / `C25K_FORECAST_URL`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            geocoding_url: non_empty_env("C25K_GEOCODING_URL").unwrap_or(defaults.geocoding_url),
            forecast_url: non_empty_env("C25K_FORECAST_URL").unwrap_or(defaults.forecast_url),
        }
    }
}

fn non_empty_env(var: &str) -> Option<String> {
    env::var(var).ok().filter(|value| !value.trim().is_empty())
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Vec<GeocodingResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: Option<DailyForecast>,
}

#[derive(Debug, Default, Deserialize)]
struct DailyForecast {
    #[serde(default)]
    temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_sum: Vec<Option<f64>>,
    #[serde(default)]
    weathercode: Vec<Option<u32>>,
}

impl DailyForecast {
    fn first_day(&self) -> Option<(f64, f64, f64, u32)> {
        let tmax = (*self.temperature_2m_max.first()?)?;
        let tmin = (*self.temperature_2m_min.first()?)?;
        let precip = self.precipitation_sum.first().copied().flatten().unwrap_or(0.0);
        let code = self.weathercode.first().copied().flatten().unwrap_or(u32::MAX);
        Some((tmin, tmax, precip, code))
    }
}

/// Open-Meteo client: geocode the location, then ask for that day's summary.
pub struct OpenMeteoClient {
    client: Client,
    endpoints: WeatherEndpoints,
}

impl OpenMeteoClient {
    pub fn new(endpoints: WeatherEndpoints) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .user_agent(concat!("c25k/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client, endpoints })
    }

    pub fn lookup(&self, location: &str, date: NaiveDate) -> Result<String, WeatherError> {
        let geo_url = format!(
            "{}?name={}&count=1&language=en&format=json",
            self.endpoints.geocoding_url,
            urlencoding::encode(location)
        );
        let response = self.client.get(&geo_url).send()?;
        if !response.status().is_success() {
            return Err(WeatherError::Status(response.status()));
        }
        let geo: GeocodingResponse = response.json()?;
        let place = geo
            .results
            .into_iter()
            .next()
            .ok_or(WeatherError::LocationNotFound)?;

        let day = date.format("%Y-%m-%d");
        let forecast_url = format!(
            "{}?latitude={}&longitude={}\
             &daily=temperature_2m_max,temperature_2m_min,precipitation_sum,weathercode\
             &timezone=auto&start_date={day}&end_date={day}&temperature_unit=fahrenheit",
            self.endpoints.forecast_url, place.latitude, place.longitude
        );
        let response = self.client.get(&forecast_url).send()?;
        if !response.status().is_success() {
            return Err(WeatherError::Status(response.status()));
        }
        let forecast: ForecastResponse = response.json()?;
        let (tmin, tmax, precip, code) = forecast
            .daily
            .unwrap_or_default()
            .first_day()
            .ok_or(WeatherError::NoForecast)?;

        debug!(location, %date, tmin, tmax, precip, code, "Fetched forecast");
        Ok(describe_forecast(tmin, tmax, precip, code))
    }
}

impl ForecastSource for OpenMeteoClient {
    fn forecast(&self, location: &str, date: NaiveDate) -> String {
        match self.lookup(location, date) {
            Ok(text) => text,
            Err(WeatherError::LocationNotFound) => {
                warn!(location, "Weather location not found");
                LOCATION_NOT_FOUND.to_string()
            }
            Err(WeatherError::NoForecast) => {
                warn!(location, %date, "No forecast available");
                FORECAST_UNAVAILABLE.to_string()
            }
            Err(err) => {
                warn!(location, error = %err, "Weather lookup failed");
                format!("Weather: error or unavailable. ({err})")
            }
        }
    }
}

/// Render one day of Open-Meteo data as display text.
pub fn describe_forecast(tmin: f64, tmax: f64, precip: f64, code: u32) -> String {
    let mut desc = format!("{tmin:.0}-{tmax:.0}°F, ");
    if precip > 2.0 {
        desc.push_str("rain likely, ");
    } else if precip > 0.0 {
        desc.push_str("chance of showers, ");
    }
    desc.push_str(match code {
        0 => "clear skies.",
        1..=3 => "partly/cloudy.",
        45 | 48 => "foggy.",
        51..=67 => "rainy.",
        71..=77 => "snowy.",
        _ => "variable.",
    });
    format!("Forecast: {desc}")
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Conditions {
    /// Heavy rain or a rainy weather code.
    pub rain_expected: bool,
    pub reasons: Vec<&'static str>,
}

impl Conditions {
    pub fn is_inclement(&self) -> bool {
        !self.reasons.is_empty()
    }
}

fn temperature_range() -> &'static Regex {
    static RANGE: OnceLock<Regex> = OnceLock::new();
    RANGE.get_or_init(|| Regex::new(r"(-?\d+)-(-?\d+)°f").expect("valid temperature pattern"))
}

pub const HIGH_HEAT_F: i64 = 90;
pub const FREEZING_F: i64 = 32;

/// Scan forecast text for conditions worth warning about.
pub fn assess_conditions(text: &str) -> Conditions {
    let lower = text.to_lowercase();
    let mut reasons = Vec::new();

    if lower.contains("rain") || lower.contains("showers") {
        reasons.push("rain");
    }
    if lower.contains("snow") {
        reasons.push("snow");
    }
    if lower.contains("fog") {
        reasons.push("fog");
    }
    if let Some(caps) = temperature_range().captures(&lower) {
        if caps[2].parse::<i64>().is_ok_and(|tmax| tmax >= HIGH_HEAT_F) {
            reasons.push("high heat");
        }
        if caps[1].parse::<i64>().is_ok_and(|tmin| tmin <= FREEZING_F) {
            reasons.push("freezing cold");
        }
    }

    Conditions {
        rain_expected: lower.contains("rain likely") || lower.contains("rainy"),
        reasons,
    }
}
