//! Baseline (no prepayment) versus prepayment-scenario comparison.
//!
//! Both schedules are generated over the same loan terms; the scenario applies
//! a plan built from a periodic contribution policy. Metrics are plain
//! differences of the two results.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::summary::months_to_years;
use crate::prepayment::{ContributionPolicy, PrepaymentPlan};
use crate::schedule::{generate_schedule, LoanParameters, ScheduleResult};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::validation;
use crate::AmortizationResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Term and interest reduction of a scenario against its baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioMetrics {
    pub months_saved: i64,
    pub interest_saved: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepaymentPlanInput {
    pub loan: LoanParameters,
    pub policy: ContributionPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepaymentPlanOutput {
    pub plan: PrepaymentPlan,
    pub amount_per_event: Money,
    pub months_saved: i64,
    pub interest_saved: Money,
    pub new_final_month_count: u32,
    /// Installment in force after the last re-amortization.
    pub new_installment: Money,
    pub baseline_total_interest: Money,
    pub scenario_total_interest: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonInput {
    pub loan: LoanParameters,
    /// Installments already paid; remaining terms are measured from here.
    #[serde(default)]
    pub paid_months: u32,
    pub policy: ContributionPolicy,
}

/// Headline figures for one scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub final_month_count: u32,
    pub months_remaining: u32,
    pub years_remaining: Decimal,
    pub total_interest: Money,
    pub total_principal_paid: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonOutput {
    pub without_prepayment: ScenarioSummary,
    pub with_prepayment: ScenarioSummary,
    pub metrics: ScenarioMetrics,
    pub baseline_schedule: ScheduleResult,
    pub prepayment_schedule: ScheduleResult,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// `months_saved = baseline − scenario` month counts;
/// `interest_saved = baseline − scenario` total interest.
pub fn compare(baseline: &ScheduleResult, scenario: &ScheduleResult) -> ScenarioMetrics {
    ScenarioMetrics {
        months_saved: i64::from(baseline.final_month_count)
            - i64::from(scenario.final_month_count),
        interest_saved: baseline.total_interest - scenario.total_interest,
    }
}

/// Run the baseline and the policy-driven scenario and report the savings.
pub fn analyze_prepayment_plan(
    input: &PrepaymentPlanInput,
) -> AmortizationResult<ComputationOutput<PrepaymentPlanOutput>> {
    let start = Instant::now();
    validation::validate_loan(&input.loan)?;

    let (plan, baseline, scenario) = run_pair(&input.loan, &input.policy)?;
    let warnings = policy_warnings(&input.loan, &plan, &scenario);
    let metrics = compare(&baseline, &scenario);

    let output = PrepaymentPlanOutput {
        amount_per_event: input.policy.amount_per_event(),
        months_saved: metrics.months_saved,
        interest_saved: metrics.interest_saved,
        new_final_month_count: scenario.final_month_count,
        new_installment: scenario.final_installment(),
        baseline_total_interest: baseline.total_interest,
        scenario_total_interest: scenario.total_interest,
        plan,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Periodic prepayment plan vs. French amortization baseline",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Full side-by-side comparison including both schedules.
pub fn compare_scenarios(
    input: &ComparisonInput,
) -> AmortizationResult<ComputationOutput<ComparisonOutput>> {
    let start = Instant::now();
    validation::validate_loan(&input.loan)?;
    validation::validate_paid_months(input.paid_months, input.loan.total_months)?;

    let (plan, baseline, scenario) = run_pair(&input.loan, &input.policy)?;
    let mut warnings = policy_warnings(&input.loan, &plan, &scenario);
    if input.paid_months >= scenario.final_month_count && !plan.is_empty() {
        warnings.push(format!(
            "With prepayments the loan would already be repaid by month {}",
            scenario.final_month_count
        ));
    }

    let output = ComparisonOutput {
        without_prepayment: scenario_summary(&baseline, input.paid_months),
        with_prepayment: scenario_summary(&scenario, input.paid_months),
        metrics: compare(&baseline, &scenario),
        baseline_schedule: baseline,
        prepayment_schedule: scenario,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Scenario comparison: without vs. with periodic prepayment",
        input,
        warnings,
        elapsed,
        output,
    ))
}

pub fn scenario_summary(schedule: &ScheduleResult, paid_months: u32) -> ScenarioSummary {
    let months_remaining = schedule.final_month_count.saturating_sub(paid_months);
    ScenarioSummary {
        final_month_count: schedule.final_month_count,
        months_remaining,
        years_remaining: months_to_years(months_remaining),
        total_interest: schedule.total_interest,
        total_principal_paid: schedule.total_principal_paid,
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn run_pair(
    loan: &LoanParameters,
    policy: &ContributionPolicy,
) -> AmortizationResult<(PrepaymentPlan, ScheduleResult, ScheduleResult)> {
    let plan = policy.build_plan(loan.total_months)?;
    let baseline = generate_schedule(loan, &PrepaymentPlan::new())?;
    let scenario = generate_schedule(loan, &plan)?;
    Ok((plan, baseline, scenario))
}

fn policy_warnings(
    loan: &LoanParameters,
    plan: &PrepaymentPlan,
    scenario: &ScheduleResult,
) -> Vec<String> {
    let mut warnings = Vec::new();
    if plan.is_empty() {
        warnings.push(format!(
            "No contribution falls within the {}-month term",
            loan.total_months
        ));
    } else if scenario.final_month_count <= 12 && loan.total_months > 12 {
        warnings.push(format!(
            "Contributions repay the loan within the first year (month {})",
            scenario.final_month_count
        ));
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn loan() -> LoanParameters {
        LoanParameters {
            principal: dec!(3000),
            annual_rate: dec!(5),
            total_months: 240,
        }
    }

    fn policy(annual_limit: Decimal, frequency_months: u32) -> ContributionPolicy {
        ContributionPolicy {
            annual_limit,
            frequency_months,
        }
    }

    #[test]
    fn test_compare_identical_schedules() {
        let s = generate_schedule(&loan(), &PrepaymentPlan::new()).unwrap();
        let m = compare(&s, &s);
        assert_eq!(m.months_saved, 0);
        assert_eq!(m.interest_saved, Decimal::ZERO);
    }

    #[test]
    fn test_plan_saves_months_and_interest() {
        let out = analyze_prepayment_plan(&PrepaymentPlanInput {
            loan: loan(),
            policy: policy(dec!(100), 12),
        })
        .unwrap()
        .result;

        assert!(out.months_saved > 0);
        assert!(out.interest_saved > Decimal::ZERO);
        assert_eq!(out.amount_per_event, dec!(100));
        assert_eq!(out.new_final_month_count as i64, 240 - out.months_saved);
        assert_eq!(out.plan.first_month(), Some(12));
        assert!(out.scenario_total_interest < out.baseline_total_interest);
    }

    #[test]
    fn test_aggressive_policy_warns() {
        let out = analyze_prepayment_plan(&PrepaymentPlanInput {
            loan: loan(),
            policy: policy(dec!(6000), 6),
        })
        .unwrap();
        assert!(out.result.new_final_month_count <= 12);
        assert!(out.warnings.iter().any(|w| w.contains("first year")));
    }

    #[test]
    fn test_compare_scenarios_remaining_terms() {
        let out = compare_scenarios(&ComparisonInput {
            loan: loan(),
            paid_months: 24,
            policy: policy(dec!(50), 6),
        })
        .unwrap()
        .result;

        assert_eq!(out.without_prepayment.final_month_count, 240);
        assert_eq!(out.without_prepayment.months_remaining, 216);
        assert_eq!(out.without_prepayment.years_remaining, dec!(18));
        assert_eq!(
            out.with_prepayment.months_remaining,
            out.with_prepayment.final_month_count - 24
        );
        assert_eq!(
            out.metrics.months_saved,
            i64::from(out.baseline_schedule.final_month_count)
                - i64::from(out.prepayment_schedule.final_month_count)
        );
        assert!(out.metrics.interest_saved > Decimal::ZERO);
    }

    #[test]
    fn test_compare_scenarios_rejects_paid_beyond_term() {
        let result = compare_scenarios(&ComparisonInput {
            loan: loan(),
            paid_months: 241,
            policy: policy(dec!(50), 6),
        });
        assert!(result.is_err());
    }
}
