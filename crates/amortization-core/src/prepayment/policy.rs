use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::PrepaymentPlan;
use crate::error::AmortizationError;
use crate::types::Money;
use crate::AmortizationResult;

/// "Every `frequency_months` months, contribute `annual_limit / (12 / frequency_months)`."
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionPolicy {
    /// Maximum extraordinary principal per year.
    pub annual_limit: Money,
    /// Months between contributions (1 = monthly, 6 = semiannual, 12 = annual).
    pub frequency_months: u32,
}

impl ContributionPolicy {
    pub fn validate(&self) -> AmortizationResult<()> {
        if self.annual_limit <= Decimal::ZERO {
            return Err(AmortizationError::InvalidInput {
                field: "annual_limit".into(),
                reason: "Annual prepayment limit must be greater than zero".into(),
            });
        }
        if !(1..=12).contains(&self.frequency_months) {
            return Err(AmortizationError::InvalidInput {
                field: "frequency_months".into(),
                reason: "Contribution frequency must be between 1 and 12 months".into(),
            });
        }
        Ok(())
    }

    /// Amount contributed at each event.
    pub fn amount_per_event(&self) -> Money {
        self.annual_limit * Decimal::from(self.frequency_months) / dec!(12)
    }

    /// Contribution months within a term: `f, 2f, 3f, … ≤ total_months`.
    pub fn event_months(&self, total_months: u32) -> impl Iterator<Item = u32> {
        let step = self.frequency_months.max(1) as usize;
        (self.frequency_months.max(1)..=total_months).step_by(step)
    }

    /// Expand the policy into a concrete plan over `total_months`.
    pub fn build_plan(&self, total_months: u32) -> AmortizationResult<PrepaymentPlan> {
        self.validate()?;
        let amount = self.amount_per_event();
        Ok(self
            .event_months(total_months)
            .map(|month| (month, amount))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(annual_limit: Decimal, frequency_months: u32) -> ContributionPolicy {
        ContributionPolicy {
            annual_limit,
            frequency_months,
        }
    }

    #[test]
    fn test_semiannual_splits_limit() {
        let p = policy(dec!(120), 6);
        assert_eq!(p.amount_per_event(), dec!(60));
        let plan = p.build_plan(24).unwrap();
        let months: Vec<u32> = plan.iter().map(|(m, _)| m).collect();
        assert_eq!(months, vec![6, 12, 18, 24]);
        assert_eq!(plan.total(), dec!(240));
    }

    #[test]
    fn test_annual_events_stop_within_term() {
        let plan = policy(dec!(100), 12).build_plan(30).unwrap();
        let months: Vec<u32> = plan.iter().map(|(m, _)| m).collect();
        assert_eq!(months, vec![12, 24]);
    }

    #[test]
    fn test_quarterly_amount() {
        assert_eq!(policy(dec!(100), 3).amount_per_event(), dec!(25));
    }

    #[test]
    fn test_term_shorter_than_frequency_gives_empty_plan() {
        let plan = policy(dec!(100), 12).build_plan(6).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_rejects_bad_policy() {
        assert!(policy(dec!(0), 6).build_plan(24).is_err());
        assert!(policy(dec!(100), 0).build_plan(24).is_err());
        assert!(policy(dec!(100), 13).build_plan(24).is_err());
    }
}
