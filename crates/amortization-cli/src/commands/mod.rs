pub mod compare;
pub mod export;
pub mod prepayment;
pub mod schedule;
pub mod series;
pub mod summary;

use clap::Args;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

use amortization_core::prepayment::ContributionPolicy;
use amortization_core::schedule::LoanParameters;

use crate::input;

/// Loan terms shared by every subcommand
#[derive(Args)]
pub struct LoanArgs {
    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Nominal annual rate in percent (5 = 5%)
    #[arg(long)]
    pub annual_rate: Option<Decimal>,

    /// Term in months
    #[arg(long)]
    pub total_months: Option<u32>,
}

impl LoanArgs {
    pub fn to_loan(&self) -> Result<LoanParameters, Box<dyn std::error::Error>> {
        Ok(LoanParameters {
            principal: self
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate: self
                .annual_rate
                .ok_or("--annual-rate is required (or provide --input)")?,
            total_months: self
                .total_months
                .ok_or("--total-months is required (or provide --input)")?,
        })
    }
}

/// Periodic contribution policy flags
#[derive(Args)]
pub struct PolicyArgs {
    /// Maximum extraordinary principal per year
    #[arg(long)]
    pub annual_limit: Option<Decimal>,

    /// Months between contributions (1-12)
    #[arg(long, default_value_t = 12)]
    pub frequency_months: u32,
}

impl PolicyArgs {
    pub fn to_policy(&self) -> Result<ContributionPolicy, Box<dyn std::error::Error>> {
        Ok(ContributionPolicy {
            annual_limit: self
                .annual_limit
                .ok_or("--annual-limit is required (or provide --input)")?,
            frequency_months: self.frequency_months,
        })
    }
}

/// Typed input from `--input <file>` or piped stdin, if either is present.
pub fn read_input<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(input::file::read_input(path)?));
    }
    input::stdin::read_stdin()
}
