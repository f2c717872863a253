use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::path::Path;

use amortization_core::analysis::comparison;
use amortization_core::calendar::{self, DEFAULT_DUE_DAY};
use amortization_core::schedule::ScheduleResult;

use super::compare::comparison_input;
use super::{LoanArgs, PolicyArgs};

/// Decimal places written when `--precision` is not given.
const DEFAULT_EXPORT_PRECISION: u32 = 4;

/// Arguments for exporting both scenarios to CSV
#[derive(Args)]
pub struct ExportArgs {
    /// Path to JSON/YAML comparison input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanArgs,

    /// Installments already paid
    #[arg(long, default_value_t = 0)]
    pub paid_months: u32,

    #[command(flatten)]
    pub policy: PolicyArgs,

    /// Directory the CSV files are written to
    #[arg(long, default_value = ".")]
    pub out_dir: String,

    /// File name prefix
    #[arg(long, default_value = "loan_schedule")]
    pub prefix: String,

    /// Loan start date (YYYY-MM-DD); adds a due date column
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Day of month installments fall due
    #[arg(long, default_value_t = DEFAULT_DUE_DAY)]
    pub due_day: u32,
}

pub fn run_export(
    args: ExportArgs,
    precision: Option<u32>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let cmp_input = comparison_input(
        args.input.as_deref(),
        &args.loan,
        args.paid_months,
        &args.policy,
    )?;
    let output = comparison::compare_scenarios(&cmp_input)?;
    let dp = precision.unwrap_or(DEFAULT_EXPORT_PRECISION);

    let dir = Path::new(&args.out_dir);
    if !dir.is_dir() {
        return Err(format!("Output directory not found: {}", dir.display()).into());
    }

    let baseline_path = dir.join(format!("{}_without_prepayment.csv", args.prefix));
    let scenario_path = dir.join(format!("{}_with_prepayment.csv", args.prefix));

    let exporter = ScheduleCsv {
        precision: dp,
        start_date: args.start_date,
        due_day: args.due_day,
    };
    exporter.write(&baseline_path, &output.result.baseline_schedule)?;
    exporter.write(&scenario_path, &output.result.prepayment_schedule)?;

    Ok(json!({
        "result": {
            "without_prepayment_file": baseline_path.display().to_string(),
            "without_prepayment_rows": output.result.baseline_schedule.final_month_count,
            "with_prepayment_file": scenario_path.display().to_string(),
            "with_prepayment_rows": output.result.prepayment_schedule.final_month_count,
            "months_saved": output.result.metrics.months_saved,
            "interest_saved": output.result.metrics.interest_saved.round_dp(dp),
        },
        "warnings": output.warnings,
    }))
}

struct ScheduleCsv {
    precision: u32,
    start_date: Option<NaiveDate>,
    due_day: u32,
}

impl ScheduleCsv {
    fn write(&self, path: &Path, schedule: &ScheduleResult) -> Result<(), Box<dyn std::error::Error>> {
        let mut wtr = csv::Writer::from_path(path)
            .map_err(|e| format!("Failed to create '{}': {}", path.display(), e))?;

        let mut headers = vec!["month"];
        if self.start_date.is_some() {
            headers.push("due_date");
        }
        headers.extend([
            "installment",
            "payment",
            "interest",
            "principal_paid",
            "prepayment",
            "ending_balance",
        ]);
        wtr.write_record(&headers)?;

        for row in &schedule.rows {
            let mut record = vec![row.month.to_string()];
            if let Some(start) = self.start_date {
                record.push(calendar::due_date(start, row.month, self.due_day)?.to_string());
            }
            for amount in [
                row.installment,
                row.payment,
                row.interest,
                row.principal_paid,
                row.prepayment,
                row.ending_balance,
            ] {
                record.push(self.fixed(amount));
            }
            wtr.write_record(&record)?;
        }

        wtr.flush()?;
        Ok(())
    }

    fn fixed(&self, amount: Decimal) -> String {
        format!("{:.*}", self.precision as usize, amount.round_dp(self.precision))
    }
}
