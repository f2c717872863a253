//! Derived views over schedules: baseline vs. prepayment comparison, loan
//! status summaries and chart-ready series.

pub mod comparison;
pub mod series;
pub mod summary;
