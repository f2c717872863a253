use clap::Args;
use serde_json::Value;

use amortization_core::analysis::summary::{self, LoanSummaryInput};

use super::{read_input, LoanArgs};

/// Arguments for the loan status summary
#[derive(Args)]
pub struct SummaryArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanArgs,

    /// Installments already paid
    #[arg(long, default_value_t = 0)]
    pub paid_months: u32,
}

pub fn run_summary(args: SummaryArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let summary_input: LoanSummaryInput = match read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => LoanSummaryInput {
            loan: args.loan.to_loan()?,
            paid_months: args.paid_months,
        },
    };
    let result = summary::loan_summary(&summary_input)?;
    Ok(serde_json::to_value(result)?)
}
