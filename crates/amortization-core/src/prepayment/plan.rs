use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::AmortizationError;
use crate::types::Money;

/// Sparse prepayment schedule keyed by 1-based month. Months without an entry
/// carry no prepayment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrepaymentPlan(BTreeMap<u32, Money>);

impl PrepaymentPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the prepayment for `month`, replacing any existing amount.
    pub fn insert(&mut self, month: u32, amount: Money) {
        self.0.insert(month, amount);
    }

    /// Add `amount` to whatever is already planned for `month`.
    pub fn add(&mut self, month: u32, amount: Money) {
        *self.0.entry(month).or_insert(Decimal::ZERO) += amount;
    }

    /// Planned prepayment for `month`, zero when absent.
    pub fn amount_for(&self, month: u32) -> Money {
        self.0.get(&month).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Entries in month order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, Money)> + '_ {
        self.0.iter().map(|(m, a)| (*m, *a))
    }

    /// Sum of all planned amounts.
    pub fn total(&self) -> Money {
        self.0.values().copied().sum()
    }

    pub fn first_month(&self) -> Option<u32> {
        self.0.keys().next().copied()
    }

    pub fn last_month(&self) -> Option<u32> {
        self.0.keys().next_back().copied()
    }
}

impl FromIterator<(u32, Money)> for PrepaymentPlan {
    fn from_iter<I: IntoIterator<Item = (u32, Money)>>(iter: I) -> Self {
        let mut plan = PrepaymentPlan::new();
        for (month, amount) in iter {
            plan.add(month, amount);
        }
        plan
    }
}

/// Parses `"period:amount,period:amount"`, e.g. `"12:100,24:250.5"`.
/// Repeated periods accumulate.
impl FromStr for PrepaymentPlan {
    type Err = AmortizationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut plan = PrepaymentPlan::new();
        for pair in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (period, amount) = pair.split_once(':').ok_or_else(|| {
                AmortizationError::InvalidPlan(format!(
                    "expected 'period:amount', got '{pair}'"
                ))
            })?;

            let period: u32 = period.trim().parse().map_err(|_| {
                AmortizationError::InvalidPlan(format!("invalid period '{}'", period.trim()))
            })?;
            let amount = Decimal::from_str(amount.trim()).map_err(|_| {
                AmortizationError::InvalidPlan(format!("invalid amount '{}'", amount.trim()))
            })?;

            if period == 0 || amount <= Decimal::ZERO {
                return Err(AmortizationError::InvalidPlan(format!(
                    "period and amount must be greater than zero in '{pair}'"
                )));
            }
            plan.add(period, amount);
        }
        Ok(plan)
    }
}
