use clap::Args;
use serde_json::Value;

use amortization_core::analysis::comparison::{self, ComparisonInput};

use super::{read_input, LoanArgs, PolicyArgs};

/// Arguments for the with/without prepayment comparison
#[derive(Args)]
pub struct CompareArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanArgs,

    /// Installments already paid
    #[arg(long, default_value_t = 0)]
    pub paid_months: u32,

    #[command(flatten)]
    pub policy: PolicyArgs,

    /// Keep both full schedules in the output
    #[arg(long)]
    pub include_schedules: bool,
}

pub fn comparison_input(
    input: Option<&str>,
    loan: &LoanArgs,
    paid_months: u32,
    policy: &PolicyArgs,
) -> Result<ComparisonInput, Box<dyn std::error::Error>> {
    match read_input(input)? {
        Some(parsed) => Ok(parsed),
        None => Ok(ComparisonInput {
            loan: loan.to_loan()?,
            paid_months,
            policy: policy.to_policy()?,
        }),
    }
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let cmp_input = comparison_input(
        args.input.as_deref(),
        &args.loan,
        args.paid_months,
        &args.policy,
    )?;
    let output = comparison::compare_scenarios(&cmp_input)?;
    let mut value = serde_json::to_value(output)?;

    if !args.include_schedules {
        if let Some(result) = value.get_mut("result").and_then(Value::as_object_mut) {
            result.remove("baseline_schedule");
            result.remove("prepayment_schedule");
        }
    }
    Ok(value)
}
