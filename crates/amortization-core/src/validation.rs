//! Range checks applied by the enveloped entry points before the engine runs.
//! The raw engine functions assume already-validated input.

use rust_decimal::Decimal;

use crate::error::AmortizationError;
use crate::prepayment::PrepaymentPlan;
use crate::schedule::{LoanParameters, ScheduleOptions};
use crate::AmortizationResult;

pub fn validate_loan(loan: &LoanParameters) -> AmortizationResult<()> {
    if loan.principal <= Decimal::ZERO {
        return Err(AmortizationError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be greater than zero".into(),
        });
    }
    if loan.annual_rate < Decimal::ZERO {
        return Err(AmortizationError::InvalidInput {
            field: "annual_rate".into(),
            reason: "Annual rate cannot be negative".into(),
        });
    }
    if loan.total_months == 0 {
        return Err(AmortizationError::InvalidInput {
            field: "total_months".into(),
            reason: "Term must be at least one month".into(),
        });
    }
    Ok(())
}

pub fn validate_paid_months(paid_months: u32, total_months: u32) -> AmortizationResult<()> {
    if paid_months > total_months {
        return Err(AmortizationError::InvalidInput {
            field: "paid_months".into(),
            reason: format!("Paid months ({paid_months}) cannot exceed the term ({total_months})"),
        });
    }
    Ok(())
}

/// Every entry must fall in `[1, total_months]` with a positive amount.
pub fn validate_plan(plan: &PrepaymentPlan, total_months: u32) -> AmortizationResult<()> {
    for (month, amount) in plan.iter() {
        if month == 0 || month > total_months {
            return Err(AmortizationError::InvalidPlan(format!(
                "month {month} is outside the term 1..={total_months}"
            )));
        }
        if amount <= Decimal::ZERO {
            return Err(AmortizationError::InvalidPlan(format!(
                "amount for month {month} must be greater than zero"
            )));
        }
    }
    Ok(())
}

pub fn validate_options(options: &ScheduleOptions) -> AmortizationResult<()> {
    if options.balance_epsilon < Decimal::ZERO {
        return Err(AmortizationError::InvalidInput {
            field: "balance_epsilon".into(),
            reason: "Balance epsilon cannot be negative".into(),
        });
    }
    Ok(())
}
