use super::types::{MAX_PROJECTION_MONTHS, TargetOutcome};

pub fn required_contribution(
    target_amount: f64,
    initial_amount: f64,
    monthly_rate: f64,
    months: f64,
) -> f64 {
    let contribution = if monthly_rate == 0.0 {
        (target_amount - initial_amount) / months
    } else {
        let growth = (1.0 + monthly_rate).powf(months);
        (target_amount - initial_amount * growth) / ((growth - 1.0) / monthly_rate)
    };

    // A negative payment means the starting balance alone overshoots the
    // target; the goal never requires a withdrawal.
    if contribution < 0.0 { 0.0 } else { contribution }
}

pub fn months_to_target(
    initial_amount: f64,
    target_amount: f64,
    monthly_rate: f64,
    contribution: f64,
) -> TargetOutcome {
    if initial_amount >= target_amount {
        return TargetOutcome::AlreadyMet;
    }
    if monthly_rate <= 0.0 && contribution <= 0.0 {
        return TargetOutcome::Unreachable;
    }

    let mut balance = initial_amount;
    let mut months = 0;
    while balance < target_amount && months < MAX_PROJECTION_MONTHS {
        balance = balance * (1.0 + monthly_rate) + contribution;
        months += 1;
    }

    if balance >= target_amount {
        TargetOutcome::Reached(months)
    } else {
        TargetOutcome::HorizonExceeded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assume, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn zero_rate_contribution_splits_remaining_target_evenly() {
        let contribution = required_contribution(1_000_000.0, 0.0, 0.0, 120.0);
        assert_approx(contribution, 1_000_000.0 / 120.0);
    }

    #[test]
    fn zero_rate_contribution_accounts_for_starting_balance() {
        let contribution = required_contribution(1_000_000.0, 400_000.0, 0.0, 100.0);
        assert_approx(contribution, 6_000.0);
    }

    #[test]
    fn solved_contribution_compounds_to_the_target() {
        let contribution = required_contribution(1_000.0, 0.0, 0.01, 12.0);

        let mut balance = 0.0;
        for _ in 0..12 {
            balance = balance * 1.01 + contribution;
        }
        assert_approx(balance, 1_000.0);
    }

    #[test]
    fn overshooting_start_clamps_contribution_to_zero() {
        assert_approx(required_contribution(1_000.0, 2_000.0, 0.01, 12.0), 0.0);
        // 900 * 1.01^12 is already above 1000 without any deposit.
        assert_approx(required_contribution(1_000.0, 900.0, 0.01, 12.0), 0.0);
    }

    #[test]
    fn start_at_target_is_already_met() {
        let outcome = months_to_target(1_000_000.0, 1_000_000.0, 0.01, 500.0);
        assert_eq!(outcome, TargetOutcome::AlreadyMet);
        assert_eq!(outcome.simulated_months(), 0);
    }

    #[test]
    fn flat_balance_with_no_deposits_is_unreachable() {
        let outcome = months_to_target(0.0, 1_000_000.0, 0.0, 0.0);
        assert_eq!(outcome, TargetOutcome::Unreachable);
        assert_eq!(outcome.simulated_months(), 0);
    }

    #[test]
    fn zero_rate_search_counts_whole_months() {
        // 250 a month with no growth: 250, 500, 750, 1000.
        let outcome = months_to_target(0.0, 1_000.0, 0.0, 250.0);
        assert_eq!(outcome, TargetOutcome::Reached(4));
    }

    #[test]
    fn interest_alone_can_cross_the_target() {
        let outcome = months_to_target(1_000.0, 1_005.0, 0.01, 0.0);
        assert_eq!(outcome, TargetOutcome::Reached(1));
    }

    #[test]
    fn negative_rate_with_deposits_can_still_reach() {
        // Balance halves each month before the deposit: 60, 90, 105.
        let outcome = months_to_target(0.0, 100.0, -0.5, 60.0);
        assert_eq!(outcome, TargetOutcome::Reached(3));
    }

    #[test]
    fn slow_trajectory_exhausts_the_horizon() {
        let outcome = months_to_target(0.0, 1_000_000.0, 0.0001, 1.0);
        assert_eq!(outcome, TargetOutcome::HorizonExceeded);
        assert_eq!(outcome.simulated_months(), MAX_PROJECTION_MONTHS);
    }

    #[test]
    fn crossing_exactly_at_the_ceiling_counts_as_reached() {
        let outcome = months_to_target(0.0, 1_200.0, 0.0, 1.0);
        assert_eq!(outcome, TargetOutcome::Reached(MAX_PROJECTION_MONTHS));
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_more_starting_capital_never_raises_the_required_contribution(
            initial in 0u32..900_000,
            extra in 1u32..200_000,
            rate_bp in 0u32..200,
            months in 1u32..600
        ) {
            let rate = rate_bp as f64 / 10_000.0;
            let base = required_contribution(1_000_000.0, initial as f64, rate, months as f64);
            let richer =
                required_contribution(1_000_000.0, (initial + extra) as f64, rate, months as f64);
            prop_assert!(richer <= base + 1e-9);
        }

        #[test]
        fn prop_solved_contribution_reaches_target_within_requested_horizon(
            initial in 0u32..900_000,
            rate_bp in 1u32..150,
            months in 1u32..600
        ) {
            let rate = rate_bp as f64 / 10_000.0;
            let target = 1_000_000.0;
            let contribution = required_contribution(target, initial as f64, rate, months as f64);
            prop_assume!(contribution > 0.0);

            // 1e-3 of slack on the target absorbs float accumulation error.
            let outcome = months_to_target(initial as f64, target - 1e-3, rate, contribution);
            match outcome {
                TargetOutcome::Reached(m) => prop_assert!(m <= months),
                other => prop_assert!(false, "expected Reached, got {other:?}"),
            }
        }
    }
}
