use c25k_cli::cli_args::{Cli, Command, ConfigCommand};
use c25k_core::config::{FileConfig, apply_runtime_overrides, file_config_to_planner};
use c25k_core::{ExportFormat, Gender, Locale, WeightUnit};
use clap::Parser;

// Integration tests for flag parsing and how the resulting overrides land on
// top of persisted defaults.

fn parse(args: &[&str]) -> Cli {
    let mut argv = vec!["c25k"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).expect("arguments should parse")
}

#[test]
fn test_no_flags_is_empty() {
    let cli = parse(&[]);
    assert!(cli.command.is_none());
    assert!(cli.plan.is_empty(), "bare invocation carries no plan flags");
    let (overrides, warnings) = cli.plan.to_runtime_overrides().unwrap();
    assert!(overrides.is_empty());
    assert!(warnings.is_empty());
}

#[test]
fn test_profile_flags() {
    let cli = parse(&[
        "--name", " Ana Lopez ", "--age", "42", "--weight", "150", "--units", "imperial",
        "--gender", "F", "--locale", "es",
    ]);
    let (overrides, _) = cli.plan.to_runtime_overrides().unwrap();
    assert_eq!(overrides.name.as_deref(), Some("Ana Lopez"));
    assert_eq!(overrides.age, Some(42));
    assert_eq!(overrides.weight, Some(150.0));
    assert_eq!(overrides.units, Some(WeightUnit::Imperial));
    assert_eq!(overrides.gender, Some(Gender::Female));
    assert_eq!(overrides.locale, Some(Locale::Es));
}

#[test]
fn test_formats_are_repeatable_and_comma_delimited() {
    let cli = parse(&["-f", "csv,json", "--format", "ics", "-f", "csv"]);
    let (overrides, warnings) = cli.plan.to_runtime_overrides().unwrap();
    assert_eq!(
        overrides.formats,
        Some(vec![ExportFormat::Csv, ExportFormat::Json, ExportFormat::Ics])
    );
    assert_eq!(warnings.len(), 1, "duplicate format should warn once");
}

#[test]
fn test_unknown_format_is_rejected() {
    let cli = parse(&["--format", "pdf"]);
    assert!(cli.plan.to_runtime_overrides().is_err());
}

#[test]
fn test_rest_days_none_clears_selection() {
    let cli = parse(&["--rest-days", "none"]);
    let (overrides, warnings) = cli.plan.to_runtime_overrides().unwrap();
    assert_eq!(overrides.rest_days, Some(Vec::new()));
    assert_eq!(warnings.len(), 1);

    let cli = parse(&["--rest-days", "fri, sun"]);
    let (overrides, _) = cli.plan.to_runtime_overrides().unwrap();
    assert_eq!(
        overrides.rest_days,
        Some(vec!["fri".to_string(), "sun".to_string()])
    );
}

#[test]
fn test_optional_fields_can_be_cleared() {
    let cli = parse(&["--email", "none", "--location", "Boston", "--goal", ""]);
    let (overrides, _) = cli.plan.to_runtime_overrides().unwrap();
    assert_eq!(overrides.email, Some(None));
    assert_eq!(overrides.location, Some(Some("Boston".to_string())));
    assert_eq!(overrides.goal, Some(None));
}

#[test]
fn test_bad_values_are_rejected() {
    for args in [
        &["--email", "not-an-address"][..],
        &["--start", "someday"][..],
        &["--gender", "x"][..],
        &["--name", "   "][..],
        &["--weight=-3"][..],
    ] {
        let cli = parse(args);
        assert!(
            cli.plan.to_runtime_overrides().is_err(),
            "{args:?} should be rejected"
        );
    }
}

#[test]
fn test_switches() {
    let cli = parse(&["--no-weather", "--dry-run", "--save"]);
    let (overrides, warnings) = cli.plan.to_runtime_overrides().unwrap();
    assert_eq!(overrides.weather, Some(false));
    assert_eq!(overrides.dry_run, Some(true));
    assert_eq!(warnings, vec!["--save is ignored during a dry run.".to_string()]);
}

#[test]
fn test_subcommands() {
    assert!(matches!(parse(&["faq"]).command, Some(Command::Faq)));
    assert!(matches!(
        parse(&["config", "show"]).command,
        Some(Command::Config(ConfigCommand::Show))
    ));
    assert!(matches!(
        parse(&["config", "init", "--force"]).command,
        Some(Command::Config(ConfigCommand::Init { force: true }))
    ));
    assert!(Cli::try_parse_from(["c25k", "config"]).is_err());
}

#[test]
fn test_flags_override_file_defaults() {
    let mut file = FileConfig::default();
    file.profile.name = Some("Saved Name".to_string());
    file.plan.weeks = 8;
    file.output.formats = vec![ExportFormat::Json];
    let mut planner = file_config_to_planner(&file);

    let cli = parse(&["--weeks", "12", "--days-per-week", "4", "--time", "18:30"]);
    let (overrides, mut warnings) = cli.plan.to_runtime_overrides().unwrap();
    apply_runtime_overrides(&mut planner, &overrides, &mut warnings);

    assert_eq!(planner.profile.name.as_deref(), Some("Saved Name"));
    assert_eq!(planner.profile.weeks, 12);
    assert_eq!(planner.profile.days_per_week, 4);
    assert_eq!(planner.profile.session_time, "18:30");
    assert_eq!(planner.formats, vec![ExportFormat::Json], "untouched without --format");
    assert!(warnings.is_empty());
}
