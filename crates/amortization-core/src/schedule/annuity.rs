use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::AmortizationError;
use crate::types::{Money, Rate};
use crate::AmortizationResult;

/// Annuity factor above which the level payment exceeds the interest by less
/// than Decimal resolves reliably. Past this point the installment has to be
/// re-derived as the remaining term shortens.
pub const PRECISE_FACTOR_LIMIT: Decimal = dec!(1_000_000_000_000);

/// `(1 + r)^n`, or `None` when it exceeds the Decimal range.
pub fn annuity_factor(monthly_rate: Rate, months: u32) -> Option<Decimal> {
    (Decimal::ONE + monthly_rate).checked_powi(i64::from(months))
}

/// Whether a level payment over `remaining_months` is too close to
/// interest-only to be held fixed for the rest of the term.
pub fn needs_refresh(monthly_rate: Rate, remaining_months: u32) -> bool {
    annuity_factor(monthly_rate, remaining_months).map_or(true, |f| f > PRECISE_FACTOR_LIMIT)
}

/// Level payment (French method) that fully amortizes `balance` over
/// `remaining_months` at `monthly_rate`:
///
/// `balance * r * (1+r)^n / ((1+r)^n - 1)`
///
/// A non-positive balance or an exhausted term yields zero; a zero rate
/// falls back to straight-line repayment. When `(1+r)^n` leaves the Decimal
/// range the payment is the interest `balance * r`.
pub fn level_payment(
    balance: Money,
    monthly_rate: Rate,
    remaining_months: u32,
) -> AmortizationResult<Money> {
    if balance <= Decimal::ZERO || remaining_months == 0 {
        return Ok(Decimal::ZERO);
    }

    if monthly_rate.is_zero() {
        return Ok(balance / Decimal::from(remaining_months));
    }

    let Some(factor) = annuity_factor(monthly_rate, remaining_months) else {
        // factor / (factor - 1) is 1 at Decimal precision.
        return balance
            .checked_mul(monthly_rate)
            .ok_or_else(|| AmortizationError::Arithmetic {
                context: format!("interest on balance {balance}"),
            });
    };

    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        // Rate too small to move the factor off 1.
        return Ok(balance / Decimal::from(remaining_months));
    }

    factor
        .checked_div(denominator)
        .and_then(|ratio| ratio.checked_mul(monthly_rate))
        .and_then(|per_unit| per_unit.checked_mul(balance))
        .ok_or_else(|| AmortizationError::Arithmetic {
            context: format!("level payment on balance {balance}"),
        })
}
