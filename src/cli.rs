use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "maintcalc",
    version,
    about = "Child maintenance range estimator"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Config file used in place of ./maintcalc.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Estimate the monthly maintenance range for one case
    Estimate(EstimateCommand),
    /// Print the effective configuration after layering and validation
    Config,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum StrategyArg {
    ClosedForm,
    PointEstimate,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Text,
    Md,
    Json,
}

#[derive(Args)]
pub struct EstimateCommand {
    /// Father's monthly income
    #[arg(long, allow_negative_numbers = true)]
    pub father_income: f64,

    /// Mother's monthly income
    #[arg(long, allow_negative_numbers = true)]
    pub mother_income: f64,

    /// Age of a child; repeat or comma-separate for several children
    #[arg(long = "child-age", value_delimiter = ',')]
    pub child_ages: Vec<u32>,

    #[arg(long, value_enum, default_value = "closed-form")]
    pub strategy: StrategyArg,

    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ReportFormat,
}
