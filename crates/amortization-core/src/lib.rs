pub mod calendar;
pub mod error;
pub mod prepayment;
pub mod schedule;
pub mod types;
pub mod validation;

#[cfg(feature = "analysis")]
pub mod analysis;

pub use error::AmortizationError;
pub use types::*;

/// Standard result type for all amortization operations
pub type AmortizationResult<T> = Result<T, AmortizationError>;
