use c25k_cli::cli_args::{Cli, Command, ConfigCommand, PlanArgs};
use c25k_cli::{faq, report};
use c25k_core::{
    FileConfig, LoggingDestination, apply_runtime_overrides, config_path, file_config_to_planner,
    init_logging, load_config, remember_overrides, render_config, run, save_config,
};
use clap::Parser;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = init_logging(LoggingDestination::FileAndStderr) {
        eprintln!("Warning: file logging unavailable ({err}).");
        if let Err(err) = init_logging(LoggingDestination::StderrOnly) {
            eprintln!("Warning: logging disabled ({err}).");
        }
    }

    if let Err(err) = dispatch(cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn dispatch(cli: Cli) -> Result<(), String> {
    match cli.command {
        Some(Command::Faq) => {
            if !cli.plan.is_empty() {
                return Err("Plan flags cannot be combined with the faq command.".into());
            }
            print!("{}", faq::render());
            Ok(())
        }
        Some(Command::Config(cmd)) => {
            if !cli.plan.is_empty() {
                return Err("Plan flags cannot be combined with config commands.".into());
            }
            handle_config_command(cmd)
        }
        None => run_plan(cli.plan),
    }
}

fn run_plan(args: PlanArgs) -> Result<(), String> {
    let load = load_config();
    let mut warnings = load.warnings;
    let mut file_config = load.config;
    let mut planner = file_config_to_planner(&file_config);

    let (overrides, mut override_warnings) = args.to_runtime_overrides()?;
    warnings.append(&mut override_warnings);
    apply_runtime_overrides(&mut planner, &overrides, &mut warnings);

    for warning in warnings {
        eprintln!("Warning: {warning}");
    }

    let outcome = run(&planner).map_err(|err| err.to_string())?;
    print!("{}", report::render(&outcome));

    if args.save && !planner.dry_run {
        remember_overrides(&mut file_config, &overrides);
        let path = save_config(&file_config).map_err(|err| err.to_string())?;
        println!("Saved preferences to {}", path.display());
    }
    Ok(())
}

fn handle_config_command(command: ConfigCommand) -> Result<(), String> {
    match command {
        ConfigCommand::Show => {
            let load = load_config();
            for warning in load.warnings {
                eprintln!("Warning: {warning}");
            }
            let raw = render_config(&load.config).map_err(|err| err.to_string())?;
            print!("{raw}");
            Ok(())
        }
        ConfigCommand::Path => {
            println!("{}", config_path().display());
            Ok(())
        }
        ConfigCommand::Init { force } => {
            let path = config_path();
            if path.exists() && !force {
                return Err(format!(
                    "{} already exists. Pass --force to replace it.",
                    path.display()
                ));
            }
            let path = save_config(&FileConfig::default()).map_err(|err| err.to_string())?;
            println!("Wrote defaults to {}", path.display());
            Ok(())
        }
    }
}
