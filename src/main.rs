mod cli;
mod config;
mod error;
mod estimate;
mod report;
mod types;

use crate::error::MaintenanceError;
use crate::estimate::regression::RegressionModel;
use crate::estimate::MaintenanceEstimator;
use crate::types::estimate::{Incomes, Strategy};
use clap::Parser;
use std::io::IsTerminal;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const INVALID_INPUT: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

const LOG_ENV: &str = "MAINTCALC_LOG";

fn init_tracing(verbose: u8, quiet: bool) {
    let fallback = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn run() -> Result<i32, MaintenanceError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let root = std::env::current_dir()?;
    let loaded = config::load_config(&root, cli.config.as_deref())?;

    match cli.command {
        cli::Commands::Estimate(cmd) => {
            let model = RegressionModel::from_config(&loaded.model);
            let estimator = MaintenanceEstimator::new(&loaded, &model);

            let strategy = match cmd.strategy {
                cli::StrategyArg::ClosedForm => Strategy::ClosedForm,
                cli::StrategyArg::PointEstimate => Strategy::PointEstimate,
            };
            debug!(?strategy, ages = ?cmd.child_ages, "estimate requested");
            let result = estimator.estimate(
                Incomes::new(cmd.father_income, cmd.mother_income),
                &cmd.child_ages,
                strategy,
            )?;

            let output_format = match cmd.format {
                cli::ReportFormat::Text => report::OutputFormat::Text,
                cli::ReportFormat::Md => report::OutputFormat::Md,
                cli::ReportFormat::Json => report::OutputFormat::Json,
            };
            let rendered = report::render(&result, output_format)?;
            println!("{rendered}");

            if result.has_exclusions() {
                Ok(exit_code::WARNINGS)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Config => {
            let rendered = toml::to_string_pretty(&loaded)?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(MaintenanceError::InvalidInput(reason)) => {
            eprintln!("error: invalid input: {}", reason);
            std::process::exit(exit_code::INVALID_INPUT);
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
