use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use amortization_core::calendar::{self, DEFAULT_DUE_DAY};
use amortization_core::prepayment::PrepaymentPlan;
use amortization_core::schedule::{self, rate, ScheduleInput, ScheduleOptions};

use super::{read_input, LoanArgs};

/// Arguments for schedule generation
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanArgs,

    /// Prepayments as period:amount pairs (e.g. "12:100,24:100")
    #[arg(long)]
    pub prepayments: Option<String>,

    /// Residual balance treated as fully repaid
    #[arg(long)]
    pub balance_epsilon: Option<Decimal>,

    /// Loan start date (YYYY-MM-DD); adds a due date to every row
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Day of month installments fall due
    #[arg(long, default_value_t = DEFAULT_DUE_DAY)]
    pub due_day: u32,
}

/// Arguments for rate conversion
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct RateArgs {
    /// Nominal annual rate in percent (5 = 5%)
    #[arg(long)]
    pub annual_rate: Decimal,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let schedule_input: ScheduleInput = match read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => {
            let prepayments: PrepaymentPlan = match args.prepayments.as_deref() {
                Some(pairs) => pairs.parse()?,
                None => PrepaymentPlan::new(),
            };
            let mut options = ScheduleOptions::default();
            if let Some(epsilon) = args.balance_epsilon {
                options.balance_epsilon = epsilon;
            }
            ScheduleInput {
                loan: args.loan.to_loan()?,
                prepayments,
                options,
            }
        }
    };

    let output = schedule::build_schedule(&schedule_input)?;
    let mut value = serde_json::to_value(&output)?;

    if let Some(start) = args.start_date {
        let dated = calendar::dated_rows(&output.result, start, args.due_day)?;
        value["result"]["rows"] = serde_json::to_value(dated)?;
    }
    Ok(value)
}

pub fn run_rate(args: RateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let monthly = rate::monthly_rate(args.annual_rate)?;
    Ok(json!({
        "result": {
            "annual_rate": args.annual_rate,
            "monthly_rate": monthly,
        }
    }))
}
