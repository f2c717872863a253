//! Installment due dates. Installment *k* falls due on `due_day` of the *k*-th
//! month after the loan's start month, clamped to the month's last day.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::AmortizationError;
use crate::schedule::{ScheduleResult, ScheduleRow};
use crate::AmortizationResult;

/// Default billing day of month.
pub const DEFAULT_DUE_DAY: u32 = 10;

/// A schedule row paired with its due date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedRow {
    pub due_date: NaiveDate,
    #[serde(flatten)]
    pub row: ScheduleRow,
}

/// Due date of the 1-based `installment`.
pub fn due_date(start: NaiveDate, installment: u32, due_day: u32) -> AmortizationResult<NaiveDate> {
    if due_day == 0 || due_day > 31 {
        return Err(AmortizationError::DateError(format!(
            "due day must be between 1 and 31, got {due_day}"
        )));
    }

    let month_start = start
        .with_day(1)
        .and_then(|d| d.checked_add_months(Months::new(installment)))
        .ok_or_else(|| {
            AmortizationError::DateError(format!(
                "installment {installment} from {start} is out of calendar range"
            ))
        })?;

    let last_day = month_start
        .checked_add_months(Months::new(1))
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(28);

    month_start
        .with_day(due_day.min(last_day))
        .ok_or_else(|| AmortizationError::DateError(format!("invalid due day {due_day}")))
}

/// Due dates of installments `1..=months`.
pub fn due_dates(start: NaiveDate, months: u32, due_day: u32) -> AmortizationResult<Vec<NaiveDate>> {
    (1..=months).map(|k| due_date(start, k, due_day)).collect()
}

/// Attach due dates to every row of a schedule.
pub fn dated_rows(
    schedule: &ScheduleResult,
    start: NaiveDate,
    due_day: u32,
) -> AmortizationResult<Vec<DatedRow>> {
    schedule
        .rows
        .iter()
        .map(|row| {
            Ok(DatedRow {
                due_date: due_date(start, row.month, due_day)?,
                row: row.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_first_installment_next_month() {
        assert_eq!(due_date(ymd(2025, 7, 25), 1, 10).unwrap(), ymd(2025, 8, 10));
        assert_eq!(due_date(ymd(2025, 7, 1), 1, 10).unwrap(), ymd(2025, 8, 10));
    }

    #[test]
    fn test_rolls_over_year_end() {
        assert_eq!(due_date(ymd(2025, 11, 3), 3, 10).unwrap(), ymd(2026, 2, 10));
    }

    #[test]
    fn test_due_day_clamped_to_short_month() {
        assert_eq!(due_date(ymd(2025, 1, 15), 1, 31).unwrap(), ymd(2025, 2, 28));
        assert_eq!(due_date(ymd(2024, 1, 15), 1, 31).unwrap(), ymd(2024, 2, 29));
    }

    #[test]
    fn test_invalid_due_day() {
        assert!(matches!(
            due_date(ymd(2025, 1, 1), 1, 0),
            Err(AmortizationError::DateError(_))
        ));
        assert!(due_date(ymd(2025, 1, 1), 1, 32).is_err());
    }

    #[test]
    fn test_due_dates_are_monthly() {
        let dates = due_dates(ymd(2025, 1, 20), 3, DEFAULT_DUE_DAY).unwrap();
        assert_eq!(dates, vec![ymd(2025, 2, 10), ymd(2025, 3, 10), ymd(2025, 4, 10)]);
    }
}
