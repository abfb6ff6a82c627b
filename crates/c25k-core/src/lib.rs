//! Core library for the Couch to 5K planner: profile validation, plan
//! building, calendar placement and every export format.

pub mod calendar;
pub mod config;
pub mod content;
pub mod export;
pub mod logging;
pub mod plan;
pub mod profile;
pub mod progress;
pub mod reminders;
pub mod runtime;
pub mod weather;

pub use calendar::{Placement, StartOption, next_monday, output_dir_name, resolve_start_date};
pub use config::{
    ConfigError, ConfigLoadResult, ConfigSource, FileConfig, RuntimeOverrides,
    apply_runtime_overrides, config_directory, config_path, file_config_to_planner, load_config,
    remember_overrides, render_config, save_config,
};
pub use export::{ExportError, ExportFormat, WrittenExport, write_exports};
pub use logging::{LoggingDestination, LoggingError, current_log_path, init_logging};
pub use plan::{DayLabel, PlanBuilder, Session, build_plan};
pub use profile::{Gender, Locale, ProfileError, ProfileInput, UserProfile, WeightUnit};
pub use runtime::{PlannerConfig, RunError, RunReport, run, run_with};
pub use weather::ForecastSource;
