use serde::Serialize;

pub const MAX_PROJECTION_MONTHS: u32 = 1200;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RateBasis {
    Monthly,
    Annual,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PeriodUnit {
    Months,
    Years,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ProjectionMode {
    TimeToTarget,
    RequiredContribution,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TargetOutcome {
    AlreadyMet,
    Unreachable,
    Reached(u32),
    HorizonExceeded,
}

impl TargetOutcome {
    pub fn simulated_months(self) -> u32 {
        match self {
            TargetOutcome::AlreadyMet | TargetOutcome::Unreachable => 0,
            TargetOutcome::Reached(months) => months,
            TargetOutcome::HorizonExceeded => MAX_PROJECTION_MONTHS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Inputs {
    pub initial_amount: f64,
    pub target_amount: f64,
    pub rate_value: f64,
    pub rate_basis: RateBasis,
    pub contribution: f64,
    pub period_value: f64,
    pub period_unit: PeriodUnit,
    pub mode: ProjectionMode,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionRow {
    pub month_index: u32,
    pub contribution: f64,
    pub interest: f64,
    pub total_invested: f64,
    pub total_interest: f64,
    pub total_accumulated: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub total_invested: f64,
    pub total_interest: f64,
    pub final_amount: f64,
    pub total_months: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_contribution: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct ProjectionResult {
    pub outcome: TargetOutcome,
    pub summary: ProjectionSummary,
    pub rows: Vec<ProjectionRow>,
}
