use clap::{Args, ValueEnum};
use serde_json::{json, Value};

use amortization_core::analysis::comparison;
use amortization_core::analysis::series::{self, SeriesKind};

use super::compare::comparison_input;
use super::{LoanArgs, PolicyArgs};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SeriesArg {
    Balance,
    CumulativeInterest,
    CumulativePrincipal,
}

impl From<SeriesArg> for SeriesKind {
    fn from(arg: SeriesArg) -> Self {
        match arg {
            SeriesArg::Balance => SeriesKind::Balance,
            SeriesArg::CumulativeInterest => SeriesKind::CumulativeInterest,
            SeriesArg::CumulativePrincipal => SeriesKind::CumulativePrincipal,
        }
    }
}

/// Arguments for chart series generation
#[derive(Args)]
pub struct SeriesArgs {
    /// Path to JSON/YAML comparison input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanArgs,

    #[command(flatten)]
    pub policy: PolicyArgs,

    /// Which curve to produce
    #[arg(long, value_enum, default_value = "balance")]
    pub kind: SeriesArg,
}

pub fn run_series(args: SeriesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let cmp_input = comparison_input(args.input.as_deref(), &args.loan, 0, &args.policy)?;
    let output = comparison::compare_scenarios(&cmp_input)?;
    let aligned = series::aligned_series(
        &output.result.baseline_schedule,
        &output.result.prepayment_schedule,
        args.kind.into(),
    );

    let rows: Vec<Value> = aligned
        .labels
        .iter()
        .zip(aligned.baseline.iter().zip(aligned.scenario.iter()))
        .map(|(month, (baseline, scenario))| {
            json!({
                "month": month,
                "without_prepayment": baseline,
                "with_prepayment": scenario,
            })
        })
        .collect();

    Ok(json!({
        "result": {
            "kind": aligned.kind,
            "rows": rows,
        },
        "methodology": output.methodology,
        "warnings": output.warnings,
    }))
}
