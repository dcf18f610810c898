mod engine;
mod solver;
mod types;

pub use engine::{generate_ledger, monthly_rate, months_in_period, run};
pub use solver::{months_to_target, required_contribution};
pub use types::{
    Inputs, MAX_PROJECTION_MONTHS, PeriodUnit, ProjectionMode, ProjectionResult, ProjectionRow,
    ProjectionSummary, RateBasis, TargetOutcome,
};
