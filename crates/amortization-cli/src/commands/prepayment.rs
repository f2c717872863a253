use clap::Args;
use serde_json::Value;

use amortization_core::analysis::comparison::{self, PrepaymentPlanInput};

use super::{read_input, LoanArgs, PolicyArgs};

/// Arguments for periodic prepayment plan analysis
#[derive(Args)]
pub struct PrepaymentArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanArgs,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

pub fn run_prepayment(args: PrepaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let plan_input: PrepaymentPlanInput = match read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => PrepaymentPlanInput {
            loan: args.loan.to_loan()?,
            policy: args.policy.to_policy()?,
        },
    };
    let result = comparison::analyze_prepayment_plan(&plan_input)?;
    Ok(serde_json::to_value(result)?)
}
