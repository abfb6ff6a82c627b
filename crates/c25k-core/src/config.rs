use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar::StartOption;
use crate::export::ExportFormat;
use crate::profile::{
    self, DEFAULT_ALERT_MINUTES, DEFAULT_DAYS_PER_WEEK, DEFAULT_SESSION_TIME, DEFAULT_TIMEZONE,
    DEFAULT_WEEKS, Gender, Locale, MAX_ALERT_MINUTES, MAX_WEEKS, ProfileInput, WeightUnit,
};
use crate::runtime::PlannerConfig;

const CONFIG_DIR_NAME: &str = "c25k";
const CONFIG_FILE_NAME: &str = "config.toml";
const CURRENT_SCHEMA_VERSION: u32 = 1;
pub const DEFAULT_OUTPUT_ROOT: &str = "created";

/// Result returned by [`load_config`], capturing the source and any non-fatal issues.
#[derive(Debug, Clone)]
pub struct ConfigLoadResult {
    pub config: FileConfig,
    pub warnings: Vec<String>,
    pub source: ConfigSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Nothing usable on disk; defaults were synthesized.
    Default,
    File,
}

/// Errors that can occur when persisting configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("TOML serialization error: {0}")]
    Ser(#[from] toml::ser::Error),
}

/// Disk-backed configuration schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default = "FileConfig::schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub profile: ProfileDefaults,
    #[serde(default)]
    pub plan: PlanPreferences,
    #[serde(default)]
    pub output: OutputPreferences,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            profile: ProfileDefaults::default(),
            plan: PlanPreferences::default(),
            output: OutputPreferences::default(),
        }
    }
}

impl FileConfig {
    const fn schema_version() -> u32 {
        CURRENT_SCHEMA_VERSION
    }
}

/// Remembered details about the runner so repeat runs need fewer flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileDefaults {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub units: WeightUnit,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub locale: Locale,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub goal: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanPreferences {
    #[serde(default = "PlanPreferences::default_weeks")]
    pub weeks: u32,
    #[serde(default = "PlanPreferences::default_days_per_week")]
    pub days_per_week: u32,
    #[serde(default = "profile::default_rest_days")]
    pub rest_days: Vec<String>,
    #[serde(default = "PlanPreferences::default_start")]
    pub start: String,
    #[serde(default = "PlanPreferences::default_session_time")]
    pub session_time: String,
    #[serde(default = "PlanPreferences::default_alert_minutes")]
    pub alert_minutes: u32,
    #[serde(default = "PlanPreferences::default_timezone")]
    pub timezone: String,
}

impl Default for PlanPreferences {
    fn default() -> Self {
        Self {
            weeks: DEFAULT_WEEKS,
            days_per_week: DEFAULT_DAYS_PER_WEEK,
            rest_days: profile::default_rest_days(),
            start: Self::default_start(),
            session_time: Self::default_session_time(),
            alert_minutes: DEFAULT_ALERT_MINUTES,
            timezone: Self::default_timezone(),
        }
    }
}

impl PlanPreferences {
    const fn default_weeks() -> u32 {
        DEFAULT_WEEKS
    }

    const fn default_days_per_week() -> u32 {
        DEFAULT_DAYS_PER_WEEK
    }

    fn default_start() -> String {
        StartOption::Default.to_string()
    }

    fn default_session_time() -> String {
        DEFAULT_SESSION_TIME.to_string()
    }

    const fn default_alert_minutes() -> u32 {
        DEFAULT_ALERT_MINUTES
    }

    fn default_timezone() -> String {
        DEFAULT_TIMEZONE.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputPreferences {
    /// Parent of every per-run directory. `~` is expanded.
    #[serde(default = "OutputPreferences::default_root")]
    pub root: String,
    #[serde(default = "OutputPreferences::default_formats")]
    pub formats: Vec<ExportFormat>,
    #[serde(default = "OutputPreferences::default_weather")]
    pub weather: bool,
}

impl Default for OutputPreferences {
    fn default() -> Self {
        Self {
            root: Self::default_root(),
            formats: Self::default_formats(),
            weather: Self::default_weather(),
        }
    }
}

impl OutputPreferences {
    fn default_root() -> String {
        DEFAULT_OUTPUT_ROOT.to_string()
    }

    fn default_formats() -> Vec<ExportFormat> {
        vec![ExportFormat::Ics]
    }

    const fn default_weather() -> bool {
        true
    }
}

/// Overrides sourced from command-line flags. `None` leaves the configured value alone.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RuntimeOverrides {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub weight: Option<f64>,
    pub units: Option<WeightUnit>,
    pub gender: Option<Gender>,
    pub locale: Option<Locale>,
    pub weeks: Option<u32>,
    pub days_per_week: Option<u32>,
    pub rest_days: Option<Vec<String>>,
    pub start: Option<String>,
    pub session_time: Option<String>,
    pub alert_minutes: Option<u32>,
    pub email: Option<Option<String>>,
    pub location: Option<Option<String>>,
    pub goal: Option<Option<String>>,
    pub timezone: Option<String>,
    pub formats: Option<Vec<ExportFormat>>,
    pub output_root: Option<String>,
    pub weather: Option<bool>,
    pub dry_run: Option<bool>,
}

impl RuntimeOverrides {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Path to the configuration directory.
pub fn config_directory() -> PathBuf {
    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

pub fn config_path() -> PathBuf {
    config_directory().join(CONFIG_FILE_NAME)
}

pub fn load_config() -> ConfigLoadResult {
    load_config_from(&config_path())
}

/// Load and sanitize a config file. Never fails; problems become warnings.
pub fn load_config_from(path: &Path) -> ConfigLoadResult {
    let mut warnings = Vec::new();

    if path.exists() {
        match fs::read_to_string(path) {
            Ok(raw) => match toml::from_str::<FileConfig>(&raw) {
                Ok(cfg) => {
                    let (cfg, mut sanitize_warnings) = sanitize_config(cfg);
                    warnings.append(&mut sanitize_warnings);
                    return ConfigLoadResult {
                        config: cfg,
                        warnings,
                        source: ConfigSource::File,
                    };
                }
                Err(err) => {
                    warnings.push(format!(
                        "Failed to parse {} as TOML: {}. Falling back to defaults.",
                        path.display(),
                        err
                    ));
                }
            },
            Err(err) => {
                warnings.push(format!(
                    "Failed to read {}: {}. Falling back to defaults.",
                    path.display(),
                    err
                ));
            }
        }
    }

    ConfigLoadResult {
        config: FileConfig::default(),
        warnings,
        source: ConfigSource::Default,
    }
}

pub fn save_config(config: &FileConfig) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(config, &path)?;
    Ok(path)
}

pub fn save_config_to(config: &FileConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render_config(config)?)?;
    Ok(())
}

pub fn render_config(config: &FileConfig) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(config)?)
}

/// Reset out-of-range values to defaults, reporting each change.
pub fn sanitize_config(mut config: FileConfig) -> (FileConfig, Vec<String>) {
    let mut warnings = Vec::new();

    if config.schema_version != CURRENT_SCHEMA_VERSION {
        warnings.push(format!(
            "Unknown config schema version {}. Resetting to {}.",
            config.schema_version, CURRENT_SCHEMA_VERSION
        ));
        return (FileConfig::default(), warnings);
    }

    let plan = &mut config.plan;
    let defaults = PlanPreferences::default();

    if !(1..=MAX_WEEKS).contains(&plan.weeks) {
        warnings.push(format!(
            "plan.weeks {} is outside 1..={}. Resetting to {}.",
            plan.weeks, MAX_WEEKS, defaults.weeks
        ));
        plan.weeks = defaults.weeks;
    }
    if !(1..=7).contains(&plan.days_per_week) {
        warnings.push(format!(
            "plan.days_per_week {} is outside 1..=7. Resetting to {}.",
            plan.days_per_week, defaults.days_per_week
        ));
        plan.days_per_week = defaults.days_per_week;
    }
    if plan.alert_minutes > MAX_ALERT_MINUTES {
        warnings.push(format!(
            "plan.alert_minutes {} exceeds {}. Resetting to {}.",
            plan.alert_minutes, MAX_ALERT_MINUTES, defaults.alert_minutes
        ));
        plan.alert_minutes = defaults.alert_minutes;
    }
    if profile::parse_session_time(&plan.session_time).is_none() {
        warnings.push(format!(
            "plan.session_time '{}' is not HH:MM. Resetting to {}.",
            plan.session_time, defaults.session_time
        ));
        plan.session_time = defaults.session_time;
    }
    if plan.start.parse::<StartOption>().is_err() {
        warnings.push(format!(
            "plan.start '{}' is not recognized. Resetting to '{}'.",
            plan.start, defaults.start
        ));
        plan.start = defaults.start;
    }
    if plan.timezone.trim().parse::<Tz>().is_err() {
        warnings.push(format!(
            "plan.timezone '{}' is unknown. Resetting to {}.",
            plan.timezone, defaults.timezone
        ));
        plan.timezone = defaults.timezone;
    }

    let mut seen = HashSet::new();
    let mut invalid = Vec::new();
    plan.rest_days.retain(|day| match profile::parse_weekday(day) {
        Some(weekday) => seen.insert(weekday),
        None => {
            invalid.push(day.clone());
            false
        }
    });
    if !invalid.is_empty() {
        warnings.push(format!(
            "Removed unrecognized rest days: {}",
            invalid.join(", ")
        ));
    }

    let mut seen_formats = HashSet::new();
    config
        .output
        .formats
        .retain(|format| seen_formats.insert(*format));
    if config.output.formats.is_empty() {
        warnings.push("output.formats is empty. Defaulting to ics.".to_string());
        config.output.formats = OutputPreferences::default_formats();
    }
    if config.output.root.trim().is_empty() {
        warnings.push(format!(
            "output.root is empty. Resetting to '{DEFAULT_OUTPUT_ROOT}'."
        ));
        config.output.root = OutputPreferences::default_root();
    }

    (config, warnings)
}

/// Translate persisted preferences into the runtime configuration.
pub fn file_config_to_planner(config: &FileConfig) -> PlannerConfig {
    let profile = &config.profile;
    let plan = &config.plan;
    PlannerConfig {
        profile: ProfileInput {
            name: profile.name.clone(),
            age: profile.age,
            weight: profile.weight,
            units: profile.units,
            gender: profile.gender,
            locale: profile.locale,
            weeks: plan.weeks,
            days_per_week: plan.days_per_week,
            rest_days: plan.rest_days.clone(),
            start: plan.start.clone(),
            session_time: plan.session_time.clone(),
            alert_minutes: plan.alert_minutes,
            email: profile.email.clone(),
            location: profile.location.clone(),
            goal: profile.goal.clone(),
            timezone: plan.timezone.clone(),
        },
        formats: config.output.formats.clone(),
        output_root: config.output.root.clone(),
        weather: config.output.weather,
        dry_run: false,
    }
}

pub fn apply_runtime_overrides(
    config: &mut PlannerConfig,
    overrides: &RuntimeOverrides,
    warnings: &mut Vec<String>,
) {
    let profile = &mut config.profile;
    if let Some(ref value) = overrides.name {
        profile.name = Some(value.clone());
    }
    if let Some(value) = overrides.age {
        profile.age = Some(value);
    }
    if let Some(value) = overrides.weight {
        profile.weight = Some(value);
    }
    if let Some(value) = overrides.units {
        profile.units = value;
    }
    if let Some(value) = overrides.gender {
        profile.gender = Some(value);
    }
    if let Some(value) = overrides.locale {
        profile.locale = value;
    }
    if let Some(value) = overrides.weeks {
        profile.weeks = value;
    }
    if let Some(value) = overrides.days_per_week {
        profile.days_per_week = value;
    }
    if let Some(ref value) = overrides.rest_days {
        profile.rest_days = value.clone();
    }
    if let Some(ref value) = overrides.start {
        profile.start = value.clone();
    }
    if let Some(ref value) = overrides.session_time {
        profile.session_time = value.clone();
    }
    if let Some(value) = overrides.alert_minutes {
        profile.alert_minutes = value;
    }
    if let Some(ref value) = overrides.email {
        profile.email = value.clone();
    }
    if let Some(ref value) = overrides.location {
        profile.location = value.clone();
    }
    if let Some(ref value) = overrides.goal {
        profile.goal = value.clone();
    }
    if let Some(ref value) = overrides.timezone {
        profile.timezone = value.clone();
    }
    if let Some(ref formats) = overrides.formats {
        if formats.is_empty() {
            warnings.push("No export formats given. Keeping configured formats.".to_string());
        } else {
            config.formats = formats.clone();
        }
    }
    if let Some(ref value) = overrides.output_root {
        config.output_root = value.clone();
    }
    if let Some(value) = overrides.weather {
        config.weather = value;
    }
    if let Some(value) = overrides.dry_run {
        config.dry_run = value;
    }
}

/// Fold flag values into the persisted config so the next run starts from them.
/// Per-run switches (`dry_run`) are never remembered.
pub fn remember_overrides(config: &mut FileConfig, overrides: &RuntimeOverrides) {
    let profile = &mut config.profile;
    if let Some(ref value) = overrides.name {
        profile.name = Some(value.clone());
    }
    if let Some(value) = overrides.age {
        profile.age = Some(value);
    }
    if let Some(value) = overrides.weight {
        profile.weight = Some(value);
    }
    if let Some(value) = overrides.units {
        profile.units = value;
    }
    if let Some(value) = overrides.gender {
        profile.gender = Some(value);
    }
    if let Some(value) = overrides.locale {
        profile.locale = value;
    }
    if let Some(ref value) = overrides.email {
        profile.email = value.clone();
    }
    if let Some(ref value) = overrides.location {
        profile.location = value.clone();
    }
    if let Some(ref value) = overrides.goal {
        profile.goal = value.clone();
    }

    let plan = &mut config.plan;
    if let Some(value) = overrides.weeks {
        plan.weeks = value;
    }
    if let Some(value) = overrides.days_per_week {
        plan.days_per_week = value;
    }
    if let Some(ref value) = overrides.rest_days {
        plan.rest_days = value.clone();
    }
    if let Some(ref value) = overrides.start {
        plan.start = value.clone();
    }
    if let Some(ref value) = overrides.session_time {
        plan.session_time = value.clone();
    }
    if let Some(value) = overrides.alert_minutes {
        plan.alert_minutes = value;
    }
    if let Some(ref value) = overrides.timezone {
        plan.timezone = value.clone();
    }

    let output = &mut config.output;
    if let Some(ref formats) = overrides.formats {
        if !formats.is_empty() {
            output.formats = formats.clone();
        }
    }
    if let Some(ref value) = overrides.output_root {
        output.root = value.clone();
    }
    if let Some(value) = overrides.weather {
        output.weather = value;
    }
}
