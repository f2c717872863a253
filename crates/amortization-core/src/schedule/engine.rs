//! Month-by-month French amortization with prepayment re-amortization.
//!
//! The level payment is computed once for the full term and recomputed over
//! the months left in the *original* term whenever a prepayment lowers the
//! outstanding balance. All math in `rust_decimal::Decimal`.
//!
//! For rate/term pairs whose annuity factor is beyond
//! [`annuity::PRECISE_FACTOR_LIMIT`] the installment is re-derived every month
//! over the remaining term until the factor comes back into range, so the
//! reported installment may move in its trailing digits.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::{annuity, rate};
use crate::prepayment::PrepaymentPlan;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::validation;
use crate::AmortizationResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Balance below which the loan is considered fully repaid (one hundredth of
/// a currency unit).
pub const DEFAULT_BALANCE_EPSILON: Decimal = dec!(0.01);

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Fixed-rate installment loan terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Amount borrowed. Full amortization holds up to about 1e15; closer to
    /// the Decimal ceiling (~7.9e28) rounding leaves a residual balance.
    pub principal: Money,
    /// Nominal annual rate in percent (e.g., 5 = 5%).
    pub annual_rate: Percent,
    /// Contractual term in months.
    pub total_months: u32,
}

/// Engine tuning knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleOptions {
    /// Residual balance treated as zero; ends the schedule early.
    pub balance_epsilon: Money,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            balance_epsilon: DEFAULT_BALANCE_EPSILON,
        }
    }
}

/// Top-level schedule request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleInput {
    pub loan: LoanParameters,
    #[serde(default)]
    pub prepayments: PrepaymentPlan,
    #[serde(default)]
    pub options: ScheduleOptions,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One amortized month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// 1-based month number.
    pub month: u32,
    /// Level installment in force after any re-amortization this month.
    pub installment: Money,
    /// Total cash outflow: installment plus prepayment.
    pub payment: Money,
    /// Interest accrued on the beginning balance.
    pub interest: Money,
    /// Scheduled amortization, capped at the outstanding balance.
    pub principal_paid: Money,
    /// Extraordinary principal applied this month.
    pub prepayment: Money,
    pub ending_balance: Money,
}

/// Full amortization schedule with aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub rows: Vec<ScheduleRow>,
    /// Effective monthly rate used for every month.
    pub monthly_rate: Rate,
    /// Level payment at origination.
    pub initial_payment: Money,
    pub total_interest: Money,
    /// Scheduled amortization plus prepayments.
    pub total_principal_paid: Money,
    pub total_prepaid: Money,
    pub final_month_count: u32,
}

impl ScheduleResult {
    /// Balance after the last emitted month (zero for an empty schedule).
    pub fn final_balance(&self) -> Money {
        self.rows
            .last()
            .map(|r| r.ending_balance)
            .unwrap_or(Decimal::ZERO)
    }

    /// Installment in force at the end of the schedule.
    pub fn final_installment(&self) -> Money {
        self.rows
            .last()
            .map(|r| r.installment)
            .unwrap_or(self.initial_payment)
    }

    /// Interest plus principal over the whole schedule.
    pub fn total_paid(&self) -> Money {
        self.total_interest + self.total_principal_paid
    }

    /// Row for a 1-based month, if the schedule reaches it.
    pub fn row(&self, month: u32) -> Option<&ScheduleRow> {
        if month == 0 {
            return None;
        }
        self.rows.get(month as usize - 1)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Validate the request and build the schedule inside the standard envelope.
pub fn build_schedule(
    input: &ScheduleInput,
) -> AmortizationResult<ComputationOutput<ScheduleResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validation::validate_loan(&input.loan)?;
    validation::validate_plan(&input.prepayments, input.loan.total_months)?;
    validation::validate_options(&input.options)?;

    let schedule = generate_schedule_with(&input.loan, &input.prepayments, &input.options)?;

    if schedule.final_month_count < input.loan.total_months {
        warnings.push(format!(
            "Loan repaid after {} of {} contractual months",
            schedule.final_month_count, input.loan.total_months
        ));
    }
    let unapplied = input.prepayments.total() - schedule.total_prepaid;
    if unapplied > Decimal::ZERO {
        warnings.push(format!(
            "{unapplied} of planned prepayments was not applied (capped at the balance or due after payoff)"
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "French amortization (constant payment) with prepayment re-amortization",
        input,
        warnings,
        elapsed,
        schedule,
    ))
}

/// Generate a schedule with the default balance epsilon.
///
/// No range checks are performed: zero or negative principal, or a zero term,
/// yields an empty schedule.
pub fn generate_schedule(
    params: &LoanParameters,
    prepayments: &PrepaymentPlan,
) -> AmortizationResult<ScheduleResult> {
    generate_schedule_with(params, prepayments, &ScheduleOptions::default())
}

/// Generate a schedule with explicit engine options.
pub fn generate_schedule_with(
    params: &LoanParameters,
    prepayments: &PrepaymentPlan,
    options: &ScheduleOptions,
) -> AmortizationResult<ScheduleResult> {
    let monthly_rate = rate::monthly_rate(params.annual_rate)?;
    let initial_payment =
        annuity::level_payment(params.principal, monthly_rate, params.total_months)?;
    let epsilon = options.balance_epsilon;

    let mut balance = params.principal;
    let mut payment = initial_payment;
    let mut refresh = annuity::needs_refresh(monthly_rate, params.total_months);
    let mut rows = Vec::with_capacity(params.total_months as usize);

    let mut total_interest = Decimal::ZERO;
    let mut total_amortized = Decimal::ZERO;
    let mut total_prepaid = Decimal::ZERO;

    for month_idx in 0..params.total_months {
        if balance < epsilon {
            break;
        }
        let month = month_idx + 1;

        if refresh {
            let remaining = params.total_months - month_idx;
            payment = annuity::level_payment(balance, monthly_rate, remaining)?;
            refresh = annuity::needs_refresh(monthly_rate, remaining);
        }

        let interest = balance * monthly_rate;
        let mut principal_paid = payment - interest;

        let mut prepayment = prepayments.amount_for(month);
        if prepayment > Decimal::ZERO {
            if prepayment > balance {
                log::warn!(
                    "month {month}: prepayment {prepayment} exceeds outstanding balance {balance}; capped"
                );
                prepayment = balance;
            }
            balance -= prepayment;
            total_prepaid += prepayment;

            if balance > Decimal::ZERO {
                let remaining = params.total_months - month;
                payment = annuity::level_payment(balance, monthly_rate, remaining)?;
                refresh = annuity::needs_refresh(monthly_rate, remaining);
                log::debug!(
                    "month {month}: re-amortized {balance} over {remaining} months, installment {payment}"
                );
            }
        }

        // Final-month protection: never amortize past zero.
        if balance < principal_paid {
            principal_paid = balance;
        }

        balance -= principal_paid;
        total_interest += interest;
        total_amortized += principal_paid;

        if balance < epsilon {
            balance = Decimal::ZERO;
        }

        rows.push(ScheduleRow {
            month,
            installment: payment,
            payment: payment + prepayment,
            interest,
            principal_paid,
            prepayment,
            ending_balance: balance,
        });
    }

    let final_month_count = rows.len() as u32;
    Ok(ScheduleResult {
        rows,
        monthly_rate,
        initial_payment,
        total_interest,
        total_principal_paid: total_amortized + total_prepaid,
        total_prepaid,
        final_month_count,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
