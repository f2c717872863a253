mod commands;
mod input;
mod logger;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::compare::CompareArgs;
use commands::export::ExportArgs;
use commands::prepayment::PrepaymentArgs;
use commands::schedule::{RateArgs, ScheduleArgs};
use commands::series::SeriesArgs;
use commands::summary::SummaryArgs;

/// French-method loan amortization and prepayment simulation
#[derive(Parser)]
#[command(
    name = "amort",
    version,
    about = "French-method loan amortization and prepayment simulation",
    long_about = "A CLI for constant-payment (French) loan amortization with decimal \
                  precision. Builds schedules with extraordinary prepayments, summarizes \
                  a loan in progress, evaluates periodic prepayment plans, compares \
                  scenarios and exports schedules to CSV."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Round decimal values to this many places on output
    #[arg(long, global = true)]
    precision: Option<u32>,

    /// Log re-amortization steps to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an amortization schedule, optionally with prepayments
    Schedule(ScheduleArgs),
    /// Convert a nominal annual rate to the effective monthly rate
    Rate(RateArgs),
    /// Summarize a loan after a number of paid installments
    Summary(SummaryArgs),
    /// Evaluate a periodic prepayment plan against the baseline
    Prepayment(PrepaymentArgs),
    /// Compare scenarios with and without periodic prepayment
    Compare(CompareArgs),
    /// Chart series (balance, cumulative interest/principal) for both scenarios
    Series(SeriesArgs),
    /// Export both scenario schedules to CSV files
    Export(ExportArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::Rate(args) => commands::schedule::run_rate(args),
        Commands::Summary(args) => commands::summary::run_summary(args),
        Commands::Prepayment(args) => commands::prepayment::run_prepayment(args),
        Commands::Compare(args) => commands::compare::run_compare(args),
        Commands::Series(args) => commands::series::run_series(args),
        Commands::Export(args) => commands::export::run_export(args, cli.precision),
        Commands::Version => {
            println!("amort {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value, cli.precision);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
