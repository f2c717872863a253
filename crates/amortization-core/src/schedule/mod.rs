//! French (constant-payment) amortization: rate conversion, the annuity
//! payment formula and the month-by-month schedule engine.

pub mod annuity;
pub mod engine;
pub mod rate;

pub use engine::{
    build_schedule, generate_schedule, generate_schedule_with, LoanParameters, ScheduleInput,
    ScheduleOptions, ScheduleResult, ScheduleRow, DEFAULT_BALANCE_EPSILON,
};
