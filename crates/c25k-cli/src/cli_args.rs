use std::str::FromStr;

use c25k_core::config::RuntimeOverrides;
use c25k_core::{ExportFormat, Gender, Locale, StartOption, WeightUnit};
use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

/// Generate a personalized Couch to 5K training calendar.
#[derive(Parser, Debug, Clone)]
#[command(name = "c25k", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub plan: PlanArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print frequently asked questions and the health disclaimer.
    Faq,
    /// Inspect or initialize persisted defaults.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Debug, Clone, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration as TOML.
    Show,
    /// Print the location of config.toml.
    Path,
    /// Write a config.toml populated with defaults.
    Init {
        /// Replace an existing file.
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

/// Arguments for plan generation (default command).
#[derive(Debug, Clone, Args, Default)]
pub struct PlanArgs {
    /// Runner's name.
    #[arg(long)]
    pub name: Option<String>,

    /// Age in years (5-120).
    #[arg(long)]
    pub age: Option<u32>,

    /// Body weight in the selected units.
    #[arg(long)]
    pub weight: Option<f64>,

    /// Weight units: metric (kg) or imperial (lbs).
    #[arg(long, value_name = "SYSTEM")]
    pub units: Option<String>,

    /// male, female or other.
    #[arg(long)]
    pub gender: Option<String>,

    /// Language for all generated text: en or es.
    #[arg(long)]
    pub locale: Option<String>,

    /// Plan length in weeks (1-52).
    #[arg(long)]
    pub weeks: Option<u32>,

    /// Workouts per week (1-7).
    #[arg(long = "days-per-week", value_name = "DAYS")]
    pub days_per_week: Option<u32>,

    /// Comma-separated rest weekdays, e.g. sat,sun.
    #[arg(long = "rest-days", value_delimiter = ',', value_name = "DAYS")]
    pub rest_days: Option<Vec<String>>,

    /// default, next-monday or YYYY-MM-DD.
    #[arg(long)]
    pub start: Option<String>,

    /// Session time of day (HH:MM).
    #[arg(long = "time", value_name = "HH:MM")]
    pub session_time: Option<String>,

    /// Export format; repeat or comma-separate for several.
    #[arg(short = 'f', long = "format", value_delimiter = ',', value_name = "FORMAT")]
    pub formats: Vec<String>,

    /// Calendar alert lead time in minutes (0 disables alerts).
    #[arg(long = "alert-minutes", value_name = "MINUTES")]
    pub alert_minutes: Option<u32>,

    /// Address for the reminder email ("none" clears a saved one).
    #[arg(long)]
    pub email: Option<String>,

    /// City used for the first-session forecast ("none" clears a saved one).
    #[arg(long)]
    pub location: Option<String>,

    /// Personal goal printed on the checklist.
    #[arg(long)]
    pub goal: Option<String>,

    /// IANA timezone attached to calendar events.
    #[arg(long)]
    pub timezone: Option<String>,

    /// Parent directory for generated plans.
    #[arg(long = "output-dir", value_hint = ValueHint::DirPath, value_name = "DIR")]
    pub output_dir: Option<String>,

    /// Skip the forecast lookup.
    #[arg(long = "no-weather", action = ArgAction::SetTrue)]
    pub no_weather: bool,

    /// Report what would be written without touching the filesystem.
    #[arg(long, action = ArgAction::SetTrue)]
    pub dry_run: bool,

    /// Remember the runner details from this run in config.toml.
    #[arg(long, action = ArgAction::SetTrue)]
    pub save: bool,
}

impl PlanArgs {
    /// Returns true when no plan flags were provided.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.age.is_none()
            && self.weight.is_none()
            && self.units.is_none()
            && self.gender.is_none()
            && self.locale.is_none()
            && self.weeks.is_none()
            && self.days_per_week.is_none()
            && self.rest_days.is_none()
            && self.start.is_none()
            && self.session_time.is_none()
            && self.formats.is_empty()
            && self.alert_minutes.is_none()
            && self.email.is_none()
            && self.location.is_none()
            && self.goal.is_none()
            && self.timezone.is_none()
            && self.output_dir.is_none()
            && !self.no_weather
            && !self.dry_run
            && !self.save
    }

    /// Convert flags into runtime overrides plus any advisory warnings.
    pub fn to_runtime_overrides(&self) -> Result<(RuntimeOverrides, Vec<String>), String> {
        let mut overrides = RuntimeOverrides::default();
        let mut warnings = Vec::new();

        if let Some(ref name) = self.name {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                return Err("--name must not be empty.".into());
            }
            overrides.name = Some(trimmed.to_string());
        }
        overrides.age = self.age;
        if let Some(weight) = self.weight {
            if !weight.is_finite() || weight <= 0.0 {
                return Err("--weight must be a positive number.".into());
            }
            overrides.weight = Some(weight);
        }
        overrides.units = parse_choice::<WeightUnit>(self.units.as_deref())?;
        overrides.gender = parse_choice::<Gender>(self.gender.as_deref())?;
        overrides.locale = parse_choice::<Locale>(self.locale.as_deref())?;
        overrides.weeks = self.weeks;
        overrides.days_per_week = self.days_per_week;
        overrides.alert_minutes = self.alert_minutes;

        if let Some(ref days) = self.rest_days {
            let days: Vec<String> = days
                .iter()
                .map(|day| day.trim().to_string())
                .filter(|day| !day.is_empty() && !day.eq_ignore_ascii_case("none"))
                .collect();
            if days.is_empty() {
                warnings.push("No rest days selected; only workouts will be scheduled.".into());
            }
            overrides.rest_days = Some(days);
        }

        if let Some(ref start) = self.start {
            start.parse::<StartOption>()?;
            overrides.start = Some(start.trim().to_string());
        }
        if let Some(ref time) = self.session_time {
            overrides.session_time = Some(time.trim().to_string());
        }

        if !self.formats.is_empty() {
            let mut formats = Vec::with_capacity(self.formats.len());
            for raw in &self.formats {
                let format = ExportFormat::from_str(raw)?;
                if formats.contains(&format) {
                    warnings.push(format!("Format '{format}' given more than once."));
                } else {
                    formats.push(format);
                }
            }
            overrides.formats = Some(formats);
        }

        if let Some(ref email) = self.email {
            let parsed = parse_optional_field(email);
            if let Some(ref address) = parsed {
                if !address.contains('@') {
                    return Err(format!("'{address}' does not look like an email address."));
                }
            }
            overrides.email = Some(parsed);
        }
        if let Some(ref location) = self.location {
            overrides.location = Some(parse_optional_field(location));
        }
        if let Some(ref goal) = self.goal {
            overrides.goal = Some(parse_optional_field(goal));
        }
        if let Some(ref timezone) = self.timezone {
            overrides.timezone = Some(timezone.trim().to_string());
        }
        if let Some(ref dir) = self.output_dir {
            overrides.output_root = Some(dir.clone());
        }
        if self.no_weather {
            overrides.weather = Some(false);
        }
        if self.dry_run {
            overrides.dry_run = Some(true);
            if self.save {
                warnings.push("--save is ignored during a dry run.".into());
            }
        }

        Ok((overrides, warnings))
    }
}

fn parse_choice<T: FromStr<Err = String>>(value: Option<&str>) -> Result<Option<T>, String> {
    value.map(str::parse).transpose()
}

fn parse_optional_field(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty()
        || matches!(
            trimmed.to_ascii_lowercase().as_str(),
            "none" | "null" | "unset"
        )
    {
        None
    } else {
        Some(trimmed.to_string())
    }
}
