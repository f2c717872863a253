//! Extraordinary principal prepayments: the sparse month → amount plan and
//! the periodic contribution policy that builds one.

pub mod plan;
pub mod policy;

pub use plan::PrepaymentPlan;
pub use policy::ContributionPolicy;
