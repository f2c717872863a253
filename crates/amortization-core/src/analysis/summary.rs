//! Status of an existing loan after a number of installments have been paid.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::prepayment::PrepaymentPlan;
use crate::schedule::{generate_schedule, LoanParameters, ScheduleResult};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::validation;
use crate::AmortizationResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanSummaryInput {
    pub loan: LoanParameters,
    /// Installments already paid.
    #[serde(default)]
    pub paid_months: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanSummary {
    pub principal: Money,
    pub monthly_payment: Money,
    pub remaining_balance: Money,
    pub remaining_months: u32,
    /// Remaining term in years, one decimal place.
    pub remaining_years: Decimal,
    pub interest_paid_to_date: Money,
    pub principal_paid_to_date: Money,
    /// Interest over the full contractual schedule.
    pub total_interest: Money,
}

pub fn loan_summary(input: &LoanSummaryInput) -> AmortizationResult<ComputationOutput<LoanSummary>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validation::validate_loan(&input.loan)?;
    validation::validate_paid_months(input.paid_months, input.loan.total_months)?;

    let schedule = generate_schedule(&input.loan, &PrepaymentPlan::new())?;
    let summary = summarize(&input.loan, &schedule, input.paid_months);

    if input.paid_months == input.loan.total_months {
        warnings.push("All installments paid; loan is fully amortized".into());
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "French amortization loan status",
        input,
        warnings,
        elapsed,
        summary,
    ))
}

/// Summarize `schedule` as seen after `paid_months` installments.
pub fn summarize(loan: &LoanParameters, schedule: &ScheduleResult, paid_months: u32) -> LoanSummary {
    let paid = schedule.rows.iter().take(paid_months as usize);
    let (interest_paid_to_date, principal_paid_to_date) = paid.fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(interest, principal), row| {
            (interest + row.interest, principal + row.principal_paid + row.prepayment)
        },
    );

    let remaining_balance = if paid_months == 0 {
        loan.principal
    } else {
        schedule
            .row(paid_months)
            .map(|r| r.ending_balance)
            .unwrap_or_else(|| schedule.final_balance())
    };

    let remaining_months = loan.total_months.saturating_sub(paid_months);

    LoanSummary {
        principal: loan.principal,
        monthly_payment: schedule
            .rows
            .first()
            .map(|r| r.installment)
            .unwrap_or(schedule.initial_payment),
        remaining_balance,
        remaining_months,
        remaining_years: months_to_years(remaining_months),
        interest_paid_to_date,
        principal_paid_to_date,
        total_interest: schedule.total_interest,
    }
}

/// Months expressed in years, rounded to one decimal place.
pub fn months_to_years(months: u32) -> Decimal {
    (Decimal::from(months) / dec!(12)).round_dp(1)
}
