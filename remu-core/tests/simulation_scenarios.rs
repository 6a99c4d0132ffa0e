//! End-to-end scenarios through the public simulator API.
//!
//! Unit tests inside each calculation module cover the stages in isolation;
//! these check that the stages chain together into the published figures.

use remu_core::validation::MAX_AMOUNT;
use remu_core::{
    LegalStatus, SimulationInput, SimulationParameters, SimulationResult, Simulator, TaxRates,
    ValidationError,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn rates() -> TaxRates {
    TaxRates::for_year(2024).expect("2024 rates should ship")
}

fn run(
    status: LegalStatus,
    input: SimulationInput,
) -> SimulationResult {
    let rates = rates();
    let simulator = Simulator::new(&rates).expect("shipped rates should validate");
    let params = SimulationParameters::new(input).expect("scenario input should validate");
    simulator.simulate(status, &params)
}

fn reference_input() -> SimulationInput {
    SimulationInput {
        annual_revenue: dec!(100000),
        operating_expenses: dec!(10000),
        target_monthly_net_compensation: dec!(4000),
        distribute_dividends: true,
        fiscal_shares: dec!(1.0),
        use_progressive_tax: false,
        share_capital: dec!(1000),
    }
}

fn assert_dividends_absent(result: &SimulationResult) {
    assert_eq!(result.gross_dividends, dec!(0));
    assert_eq!(result.dividend_social_contributions, dec!(0));
    assert_eq!(result.dividend_tax, dec!(0));
    assert_eq!(result.net_dividends, dec!(0));
}

// =============================================================================
// reference scenarios
// =============================================================================

#[test]
fn test_sasu_reference_scenario() {
    let r = run(LegalStatus::Sasu, reference_input());

    assert_eq!(r.status, LegalStatus::Sasu);
    assert_eq!(r.profit_before_compensation, dec!(90000));
    assert_eq!(r.net_compensation, dec!(48000));
    assert_eq!(r.social_contributions, dec!(39360));
    assert_eq!(r.profit_after_compensation, dec!(2640));
    assert_eq!(r.corporate_tax, dec!(396));
    assert_eq!(r.post_tax_result, dec!(2244));
    assert_eq!(r.gross_dividends, dec!(2244));
    assert_eq!(r.dividend_social_contributions, dec!(0));
    assert_eq!(r.dividend_tax, dec!(673.2));
    assert_eq!(r.net_dividends, dec!(1570.8));
    assert_eq!(r.income_tax, dec!(6246.23));
    assert_eq!(r.disposable_income, dec!(43324.57));
    assert_eq!(r.overall_levy_rate, dec!(0.4667543));
}

#[test]
fn test_eurl_reference_scenario() {
    let r = run(LegalStatus::Eurl, reference_input());

    assert_eq!(r.status, LegalStatus::Eurl);
    assert_eq!(r.net_compensation, dec!(48000));
    assert_eq!(r.social_contributions, dec!(21600));
    assert_eq!(r.gross_compensation, dec!(62880));
    assert_eq!(r.profit_after_compensation, dec!(20400));
    assert_eq!(r.corporate_tax, dec!(3060));
    assert_eq!(r.post_tax_result, dec!(17340));
    assert_eq!(r.gross_dividends, dec!(17340));
    assert_eq!(r.dividend_social_contributions, dec!(7758));
    assert_eq!(r.dividend_tax, dec!(2874.6));
    assert_eq!(r.net_dividends, dec!(6707.4));
    assert_eq!(r.taxable_income, dec!(43200));
    assert_eq!(r.income_tax, dec!(6246.23));
    assert_eq!(r.disposable_income, dec!(48461.17));
    assert_eq!(r.overall_levy_rate, dec!(0.4153883));
}

#[test]
fn test_clamped_compensation_scenario() {
    // 2916.67 * 12 = 35000.04, cost 63700.07 > 40000
    let r = run(
        LegalStatus::Sasu,
        SimulationInput {
            annual_revenue: dec!(50000),
            operating_expenses: dec!(10000),
            target_monthly_net_compensation: dec!(2916.67),
            distribute_dividends: false,
            ..reference_input()
        },
    );

    assert_eq!(r.profit_before_compensation, dec!(40000));
    assert_eq!(r.net_compensation.round_dp(2), dec!(21978.02));
    assert_eq!(r.social_contributions.round_dp(2), dec!(18021.98));
    assert_eq!(r.net_compensation + r.social_contributions, dec!(40000));
    assert_eq!(r.profit_after_compensation, dec!(0));
    assert_eq!(r.corporate_tax, dec!(0));
    assert_eq!(r.post_tax_result, dec!(0));
    assert_dividends_absent(&r);
}

#[test]
fn test_clamped_scenario_with_dividends_fails_feasibility_check() {
    let result = SimulationParameters::new(SimulationInput {
        annual_revenue: dec!(50000),
        operating_expenses: dec!(10000),
        target_monthly_net_compensation: dec!(2916.67),
        distribute_dividends: true,
        ..reference_input()
    });

    assert!(matches!(
        result,
        Err(ValidationError::DividendsNotFeasible { .. })
    ));
}

#[test]
fn test_clamped_scenario_with_dividends_distributes_nothing() {
    // 100000 - 10000 - 60000 * 1.5 = 0 passes the pre-check,
    // but 60000 * 1.82 = 109200 exceeds the 90000 profit.
    let r = run(
        LegalStatus::Sasu,
        SimulationInput {
            annual_revenue: dec!(100000),
            operating_expenses: dec!(10000),
            target_monthly_net_compensation: dec!(5000),
            distribute_dividends: true,
            ..reference_input()
        },
    );

    assert_eq!(r.net_compensation + r.social_contributions, dec!(90000));
    assert!(r.net_compensation < dec!(60000));
    assert_eq!(r.profit_after_compensation, dec!(0));
    assert_eq!(r.post_tax_result, dec!(0));
    assert_dividends_absent(&r);
    assert_eq!(r.disposable_income, r.net_compensation - r.income_tax);
}

#[test]
fn test_oversized_amounts_are_rejected_before_simulation() {
    let result = SimulationParameters::new(SimulationInput {
        annual_revenue: dec!(70000000000000000000000000000),
        operating_expenses: dec!(0),
        target_monthly_net_compensation: dec!(4000000000000000000000000000),
        distribute_dividends: false,
        ..reference_input()
    });

    assert!(matches!(
        result,
        Err(ValidationError::AmountTooLarge { field: "annual revenue", .. })
    ));
}

#[test]
fn test_largest_accepted_amounts_simulate() {
    let input = SimulationInput {
        annual_revenue: MAX_AMOUNT,
        operating_expenses: dec!(0),
        target_monthly_net_compensation: dec!(80000000000),
        distribute_dividends: false,
        share_capital: MAX_AMOUNT,
        ..reference_input()
    };

    for status in LegalStatus::ALL {
        let r = run(status, input.clone());

        assert!(r.net_compensation + r.social_contributions <= MAX_AMOUNT);
        assert!(r.overall_levy_rate >= dec!(0) && r.overall_levy_rate <= dec!(1));
    }
}

#[test]
fn test_zero_revenue_scenario() {
    let input = SimulationInput {
        annual_revenue: dec!(0),
        operating_expenses: dec!(0),
        target_monthly_net_compensation: dec!(0),
        ..reference_input()
    };

    for status in LegalStatus::ALL {
        let r = run(status, input.clone());

        assert_eq!(r.profit_before_compensation, dec!(0));
        assert_eq!(r.net_compensation, dec!(0));
        assert_eq!(r.social_contributions, dec!(0));
        assert_eq!(r.corporate_tax, dec!(0));
        assert_eq!(r.income_tax, dec!(0));
        assert_eq!(r.disposable_income, dec!(0));
        assert_eq!(r.overall_levy_rate, dec!(0));
        assert_dividends_absent(&r);
    }
}

// =============================================================================
// dividend rules
// =============================================================================

#[test]
fn test_no_distribution_zeroes_every_dividend_field() {
    for status in LegalStatus::ALL {
        let r = run(
            status,
            SimulationInput {
                distribute_dividends: false,
                ..reference_input()
            },
        );

        assert!(r.post_tax_result > dec!(0));
        assert_dividends_absent(&r);
        assert_eq!(
            r.disposable_income,
            r.net_compensation - r.income_tax,
            "{status} disposable income should be compensation only"
        );
    }
}

#[test]
fn test_sasu_dividends_never_bear_contributions() {
    for capital in [dec!(1), dec!(1000), dec!(1000000)] {
        let r = run(
            LegalStatus::Sasu,
            SimulationInput {
                target_monthly_net_compensation: dec!(2000),
                share_capital: capital,
                ..reference_input()
            },
        );

        assert!(r.gross_dividends > dec!(0));
        assert_eq!(r.dividend_social_contributions, dec!(0));
    }
}

#[test]
fn test_eurl_dividend_contributions_follow_capital_threshold() {
    for capital in [dec!(100), dec!(1000), dec!(50000), dec!(173400), dec!(200000)] {
        let r = run(
            LegalStatus::Eurl,
            SimulationInput {
                share_capital: capital,
                ..reference_input()
            },
        );

        let threshold = capital * dec!(0.10);
        let expected = (r.gross_dividends - threshold).max(Decimal::ZERO) * dec!(0.45);
        assert_eq!(
            r.dividend_social_contributions, expected,
            "capital {capital}"
        );
    }
}

#[test]
fn test_progressive_option_moves_dividends_into_income_tax_base() {
    let flat = run(LegalStatus::Eurl, reference_input());
    let progressive = run(
        LegalStatus::Eurl,
        SimulationInput {
            use_progressive_tax: true,
            ..reference_input()
        },
    );

    assert_eq!(flat.taxable_income, dec!(43200));
    // 43200 + 9582 * 0.6
    assert_eq!(progressive.taxable_income, dec!(48949.2));
    // 9582 * 0.172
    assert_eq!(progressive.dividend_tax, dec!(1648.104));
    assert!(progressive.income_tax > flat.income_tax);
}

#[test]
fn test_larger_household_pays_less_income_tax() {
    let single = run(LegalStatus::Sasu, reference_input());
    let couple = run(
        LegalStatus::Sasu,
        SimulationInput {
            fiscal_shares: dec!(2),
            ..reference_input()
        },
    );

    assert!(couple.income_tax < single.income_tax);
    assert_eq!(couple.net_compensation, single.net_compensation);
}

// =============================================================================
// invariants
// =============================================================================

#[test]
fn test_levy_rate_within_unit_interval() {
    for step in 1..=10 {
        let revenue = Decimal::from(step) * dec!(25000);
        for target_share in [dec!(0.05), dec!(0.3), dec!(0.7), dec!(0.95)] {
            for status in LegalStatus::ALL {
                let r = run(
                    status,
                    SimulationInput {
                        annual_revenue: revenue,
                        operating_expenses: revenue * dec!(0.2),
                        target_monthly_net_compensation: (revenue * target_share / dec!(12))
                            .round_dp(2),
                        distribute_dividends: false,
                        ..reference_input()
                    },
                );

                assert!(
                    r.overall_levy_rate >= dec!(0) && r.overall_levy_rate <= dec!(1),
                    "{status} at revenue {revenue}: {}",
                    r.overall_levy_rate
                );
                assert!(r.profit_after_compensation >= dec!(0));
                assert_eq!(
                    r.total_levies() + r.disposable_income + r.operating_expenses
                        + (r.post_tax_result - r.gross_dividends),
                    r.revenue,
                    "{status} at revenue {revenue} does not balance"
                );
            }
        }
    }
}

// =============================================================================
// comparison
// =============================================================================

#[test]
fn test_compare_reference_scenario() {
    let rates = rates();
    let simulator = Simulator::new(&rates).unwrap();
    let params = SimulationParameters::new(reference_input()).unwrap();

    let comparison = simulator.compare(&params);

    assert_eq!(comparison.sasu.disposable_income, dec!(43324.57));
    assert_eq!(comparison.eurl.disposable_income, dec!(48461.17));
    assert_eq!(comparison.best_status(), LegalStatus::Eurl);
    assert_eq!(comparison.annual_difference(), dec!(5136.60));
    assert_eq!(comparison.result(LegalStatus::Sasu), &comparison.sasu);
}

#[test]
fn test_compare_zero_revenue_is_a_tie_won_by_sasu() {
    let rates = rates();
    let simulator = Simulator::new(&rates).unwrap();
    let params = SimulationParameters::new(SimulationInput {
        annual_revenue: dec!(0),
        operating_expenses: dec!(0),
        target_monthly_net_compensation: dec!(0),
        ..reference_input()
    })
    .unwrap();

    assert_eq!(simulator.compare(&params).best_status(), LegalStatus::Sasu);
}

#[test]
fn test_simulation_under_debug_subscriber() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let r = run(LegalStatus::Eurl, reference_input());
        assert_eq!(r.disposable_income, dec!(48461.17));
    });
}

#[test]
fn test_unsupported_year_is_rejected() {
    assert!(matches!(
        TaxRates::for_year(2023),
        Err(ValidationError::UnsupportedYear { requested: 2023, .. })
    ));
}
