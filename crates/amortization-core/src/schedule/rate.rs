use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::AmortizationError;
use crate::types::{Percent, Rate};
use crate::AmortizationResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Effective monthly rate equivalent to a nominal annual percentage:
/// `(1 + annual_rate / 100)^(1/12) - 1`.
///
/// A zero annual rate maps to exactly zero. Rates at or below -100% have no
/// real twelfth root and are rejected.
pub fn monthly_rate(annual_rate: Percent) -> AmortizationResult<Rate> {
    if annual_rate.is_zero() {
        return Ok(Decimal::ZERO);
    }

    let growth = Decimal::ONE + annual_rate / dec!(100);
    if growth <= Decimal::ZERO {
        return Err(AmortizationError::Arithmetic {
            context: format!("monthly rate conversion of {annual_rate}% (growth factor {growth})"),
        });
    }

    growth
        .checked_powd(Decimal::ONE / MONTHS_PER_YEAR)
        .map(|monthly_growth| monthly_growth - Decimal::ONE)
        .ok_or_else(|| AmortizationError::Arithmetic {
            context: format!("monthly rate conversion of {annual_rate}%"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_rate_is_exactly_zero() {
        assert_eq!(monthly_rate(Decimal::ZERO).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_five_percent_annual() {
        // 1.05^(1/12) - 1 ≈ 0.0040741237836
        let r = monthly_rate(dec!(5)).unwrap();
        assert!((r - dec!(0.0040741237836)).abs() < dec!(0.000000001), "got {r}");
    }

    #[test]
    fn test_compounds_back_to_annual() {
        let r = monthly_rate(dec!(7.25)).unwrap();
        let annual = (Decimal::ONE + r).powi(12);
        assert!((annual - dec!(1.0725)).abs() < dec!(0.00000001), "got {annual}");
    }

    #[test]
    fn test_effective_below_nominal_over_twelve() {
        // Compounding conversion is always below the simple nominal/12 split.
        let r = monthly_rate(dec!(12)).unwrap();
        assert!(r < dec!(0.01));
        assert!(r > dec!(0.009));
    }

    #[test]
    fn test_rate_at_minus_hundred_rejected() {
        assert!(matches!(
            monthly_rate(dec!(-100)),
            Err(AmortizationError::Arithmetic { .. })
        ));
        assert!(monthly_rate(dec!(-250)).is_err());
    }
}
