//! Chart-ready series derived from schedule rows: outstanding balance,
//! cumulative interest and cumulative principal.

use serde::{Deserialize, Serialize};

use crate::schedule::{ScheduleResult, ScheduleRow};
use crate::types::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Balance,
    CumulativeInterest,
    CumulativePrincipal,
}

/// Two scenarios on a common month axis. The shorter series is padded with
/// `None` so both line up with `labels`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedSeries {
    pub kind: SeriesKind,
    pub labels: Vec<u32>,
    pub baseline: Vec<Option<Money>>,
    pub scenario: Vec<Option<Money>>,
}

pub fn series(schedule: &ScheduleResult, kind: SeriesKind) -> Vec<Money> {
    match kind {
        SeriesKind::Balance => balance_series(schedule),
        SeriesKind::CumulativeInterest => cumulative(&schedule.rows, |r| r.interest),
        SeriesKind::CumulativePrincipal => {
            cumulative(&schedule.rows, |r| r.principal_paid + r.prepayment)
        }
    }
}

pub fn balance_series(schedule: &ScheduleResult) -> Vec<Money> {
    schedule.rows.iter().map(|r| r.ending_balance).collect()
}

pub fn cumulative_interest_series(schedule: &ScheduleResult) -> Vec<Money> {
    series(schedule, SeriesKind::CumulativeInterest)
}

pub fn cumulative_principal_series(schedule: &ScheduleResult) -> Vec<Money> {
    series(schedule, SeriesKind::CumulativePrincipal)
}

pub fn aligned_series(
    baseline: &ScheduleResult,
    scenario: &ScheduleResult,
    kind: SeriesKind,
) -> AlignedSeries {
    let len = baseline.rows.len().max(scenario.rows.len());
    let pad = |values: Vec<Money>| {
        let mut padded: Vec<Option<Money>> = values.into_iter().map(Some).collect();
        padded.resize(len, None);
        padded
    };

    AlignedSeries {
        kind,
        labels: (1..=len as u32).collect(),
        baseline: pad(series(baseline, kind)),
        scenario: pad(series(scenario, kind)),
    }
}

fn cumulative(rows: &[ScheduleRow], value: impl Fn(&ScheduleRow) -> Money) -> Vec<Money> {
    rows.iter()
        .scan(Money::ZERO, |acc, row| {
            *acc += value(row);
            Some(*acc)
        })
        .collect()
}
