use super::solver::{months_to_target, required_contribution};
use super::types::{
    Inputs, PeriodUnit, ProjectionMode, ProjectionResult, ProjectionRow, ProjectionSummary,
    RateBasis, TargetOutcome,
};

// An annual figure is spread nominally across twelve months (6% annual reads
// as 0.5% per month), never compounded into an equivalent monthly rate.
pub fn monthly_rate(rate_value: f64, basis: RateBasis) -> f64 {
    match basis {
        RateBasis::Monthly => rate_value / 100.0,
        RateBasis::Annual => rate_value / 12.0 / 100.0,
    }
}

pub fn months_in_period(period_value: f64, unit: PeriodUnit) -> f64 {
    match unit {
        PeriodUnit::Months => period_value,
        PeriodUnit::Years => period_value * 12.0,
    }
}

pub fn run(inputs: &Inputs) -> ProjectionResult {
    let rate = monthly_rate(inputs.rate_value, inputs.rate_basis);

    match inputs.mode {
        ProjectionMode::TimeToTarget => {
            let outcome = months_to_target(
                inputs.initial_amount,
                inputs.target_amount,
                rate,
                inputs.contribution,
            );
            let rows = generate_ledger(
                inputs.initial_amount,
                rate,
                inputs.contribution,
                outcome.simulated_months(),
            );
            let summary = summarize(&rows, None);
            ProjectionResult {
                outcome,
                summary,
                rows,
            }
        }
        ProjectionMode::RequiredContribution => {
            let months = months_in_period(inputs.period_value, inputs.period_unit);
            let (contribution, outcome) = if months <= 0.0 {
                (0.0, TargetOutcome::AlreadyMet)
            } else {
                let contribution = required_contribution(
                    inputs.target_amount,
                    inputs.initial_amount,
                    rate,
                    months,
                );
                let outcome = if contribution > 0.0 {
                    TargetOutcome::Reached(months as u32)
                } else {
                    TargetOutcome::AlreadyMet
                };
                (contribution, outcome)
            };
            let rows = generate_ledger(inputs.initial_amount, rate, contribution, months as u32);
            let summary = summarize(&rows, Some(contribution));
            ProjectionResult {
                outcome,
                summary,
                rows,
            }
        }
    }
}

pub fn generate_ledger(
    initial_amount: f64,
    monthly_rate: f64,
    contribution: f64,
    months: u32,
) -> Vec<ProjectionRow> {
    let mut rows = Vec::with_capacity(months as usize + 1);
    rows.push(ProjectionRow {
        month_index: 0,
        contribution: 0.0,
        interest: 0.0,
        total_invested: initial_amount,
        total_interest: 0.0,
        total_accumulated: initial_amount,
    });

    let mut balance = initial_amount;
    let mut total_invested = initial_amount;
    let mut total_interest = 0.0;
    for month in 1..=months {
        let interest = balance * monthly_rate;
        balance += interest + contribution;
        total_invested += contribution;
        total_interest += interest;
        rows.push(ProjectionRow {
            month_index: month,
            contribution,
            interest,
            total_invested,
            total_interest,
            total_accumulated: balance,
        });
    }
    rows
}

fn summarize(rows: &[ProjectionRow], required_contribution: Option<f64>) -> ProjectionSummary {
    let last = rows
        .last()
        .expect("ledger always contains the month-zero row");
    ProjectionSummary {
        total_invested: last.total_invested,
        total_interest: last.total_interest,
        final_amount: last.total_accumulated,
        total_months: last.month_index,
        required_contribution,
    }
}
