use amortization_core::prepayment::{ContributionPolicy, PrepaymentPlan};
use amortization_core::schedule::{
    annuity, generate_schedule, rate, LoanParameters, ScheduleResult,
};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn loan(principal: Decimal, annual_rate: Decimal, total_months: u32) -> LoanParameters {
    LoanParameters {
        principal,
        annual_rate,
        total_months,
    }
}

fn sample_loans() -> Vec<LoanParameters> {
    vec![
        loan(dec!(3000), dec!(5), 240),
        loan(dec!(100_000), dec!(4.5), 360),
        loan(dec!(25_000), dec!(12), 60),
        loan(dec!(1000), dec!(0), 10),
        loan(dec!(500), dec!(3.2), 1),
        loan(dec!(7_777.77), dec!(0.75), 97),
    ]
}

fn amortized(schedule: &ScheduleResult) -> Decimal {
    schedule
        .rows
        .iter()
        .map(|r| r.principal_paid + r.prepayment)
        .sum()
}

fn assert_close(actual: Decimal, expected: Decimal, relative: Decimal) {
    let tolerance = expected.abs() * relative;
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}

// ===========================================================================
// Concrete scenarios
// ===========================================================================

#[test]
fn test_baseline_3000_at_5_percent_over_240_months() {
    let s = generate_schedule(&loan(dec!(3000), dec!(5), 240), &PrepaymentPlan::new()).unwrap();

    assert_eq!(s.final_month_count, 240);
    assert_eq!(s.rows.len(), 240);
    assert!(s.total_interest > Decimal::ZERO);
    assert_eq!(s.final_balance(), Decimal::ZERO);

    // Level payment ≈ 19.6151
    assert!((s.initial_payment - dec!(19.6151)).abs() < dec!(0.0001));
    // First month: interest on the full principal.
    assert!((s.rows[0].interest - dec!(12.2224)).abs() < dec!(0.0001));
    assert!((s.total_interest - dec!(1707.6226)).abs() < dec!(0.001));
}

#[test]
fn test_single_prepayment_at_month_12() {
    let plan: PrepaymentPlan = [(12, dec!(100))].into_iter().collect();
    let s = generate_schedule(&loan(dec!(3000), dec!(5), 240), &plan).unwrap();

    assert!(s.final_month_count < 240);
    assert_eq!(s.final_month_count, 239);
    assert_close(s.total_principal_paid, dec!(3000), dec!(0.000001));

    let before = s.rows[10].installment;
    let event = &s.rows[11];
    assert_eq!(before, s.initial_payment);
    assert!(event.installment < before, "payment must be recomputed at the event");
    assert!((event.installment - dec!(18.9930)).abs() < dec!(0.0001));
    assert_eq!(event.payment, event.installment + dec!(100));
}

#[test]
fn test_zero_rate_1000_over_10_months() {
    let s = generate_schedule(&loan(dec!(1000), dec!(0), 10), &PrepaymentPlan::new()).unwrap();

    assert_eq!(s.final_month_count, 10);
    for (i, row) in s.rows.iter().enumerate() {
        assert_eq!(row.month, i as u32 + 1);
        assert_eq!(row.interest, Decimal::ZERO);
        assert_eq!(row.principal_paid, dec!(100));
    }
    assert_eq!(s.rows[9].ending_balance, Decimal::ZERO);
}

// ===========================================================================
// Properties over a spread of loans
// ===========================================================================

#[test]
fn test_full_amortization_without_prepayment() {
    for params in sample_loans() {
        let s = generate_schedule(&params, &PrepaymentPlan::new()).unwrap();
        assert_eq!(s.final_month_count, params.total_months, "{params:?}");
        assert_eq!(s.final_balance(), Decimal::ZERO, "{params:?}");
        assert_close(amortized(&s), params.principal, dec!(0.000001));
        assert_close(s.total_principal_paid, params.principal, dec!(0.000001));
    }
}

#[test]
fn test_balance_is_non_increasing_and_non_negative() {
    for params in sample_loans() {
        let plan = ContributionPolicy {
            annual_limit: params.principal / dec!(10),
            frequency_months: 6,
        }
        .build_plan(params.total_months)
        .unwrap();

        for p in [&PrepaymentPlan::new(), &plan] {
            let s = generate_schedule(&params, p).unwrap();
            let mut previous = params.principal;
            for row in &s.rows {
                assert!(row.ending_balance <= previous, "{params:?} month {}", row.month);
                assert!(row.ending_balance >= Decimal::ZERO);
                assert!(row.principal_paid >= Decimal::ZERO);
                previous = row.ending_balance;
            }
        }
    }
}

#[test]
fn test_months_are_contiguous_from_one() {
    let plan: PrepaymentPlan = "6:500,18:500".parse().unwrap();
    let s = generate_schedule(&loan(dec!(10_000), dec!(6), 48), &plan).unwrap();
    let months: Vec<u32> = s.rows.iter().map(|r| r.month).collect();
    let expected: Vec<u32> = (1..=s.final_month_count).collect();
    assert_eq!(months, expected);
}

#[test]
fn test_prepayment_never_lengthens_or_costs_more() {
    for params in sample_loans() {
        let baseline = generate_schedule(&params, &PrepaymentPlan::new()).unwrap();
        for frequency_months in [1, 3, 6, 12] {
            let plan = ContributionPolicy {
                annual_limit: params.principal / dec!(20),
                frequency_months,
            }
            .build_plan(params.total_months)
            .unwrap();

            let scenario = generate_schedule(&params, &plan).unwrap();
            assert!(scenario.final_month_count <= baseline.final_month_count);
            assert!(scenario.total_interest <= baseline.total_interest);
            assert!(scenario.final_month_count <= params.total_months);
            assert_close(scenario.total_principal_paid, params.principal, dec!(0.000001));
        }
    }
}

#[test]
fn test_reamortization_uses_remaining_original_term() {
    let params = loan(dec!(20_000), dec!(7), 120);
    let plan: PrepaymentPlan = [(30, dec!(2_000))].into_iter().collect();
    let s = generate_schedule(&params, &plan).unwrap();

    let r = s.monthly_rate;
    let before_event = s.rows[28].ending_balance;
    let after_prepayment = before_event - dec!(2_000);
    let expected = annuity::level_payment(after_prepayment, r, 120 - 30).unwrap();
    assert_eq!(s.rows[29].installment, expected);
}

#[test]
fn test_level_payment_is_pure() {
    let r = rate::monthly_rate(dec!(5)).unwrap();
    let first = annuity::level_payment(dec!(2809.27), r, 228).unwrap();
    let second = annuity::level_payment(dec!(2809.27), r, 228).unwrap();
    assert_eq!(first, second);
}

// ===========================================================================
// Out-of-contract inputs
// ===========================================================================

#[test]
fn test_degenerate_inputs_give_empty_schedule() {
    for params in [
        loan(dec!(0), dec!(5), 12),
        loan(dec!(-100), dec!(5), 12),
        loan(dec!(100), dec!(5), 0),
        loan(dec!(0.005), dec!(5), 12),
    ] {
        let s = generate_schedule(&params, &PrepaymentPlan::new()).unwrap();
        assert!(s.rows.is_empty(), "{params:?}");
        assert_eq!(s.final_month_count, 0);
        assert_eq!(s.total_interest, Decimal::ZERO);
    }
}

#[test]
fn test_prepayment_of_entire_balance_ends_schedule() {
    let plan: PrepaymentPlan = [(1, dec!(1_000_000))].into_iter().collect();
    let s = generate_schedule(&loan(dec!(5000), dec!(5), 60), &plan).unwrap();
    assert_eq!(s.final_month_count, 1);
    assert_eq!(s.rows[0].prepayment, dec!(5000));
    assert_eq!(s.rows[0].principal_paid, Decimal::ZERO);
    assert_eq!(s.total_principal_paid, dec!(5000));
}

#[test]
fn test_rate_below_minus_hundred_is_an_error() {
    assert!(generate_schedule(&loan(dec!(1000), dec!(-150), 12), &PrepaymentPlan::new()).is_err());
}

#[test]
fn test_high_rate_long_term_fully_amortizes() {
    for params in [
        loan(dec!(100_000), dec!(100), 1200),
        loan(dec!(100_000), dec!(300), 600),
        loan(dec!(100_000), dec!(900), 360),
    ] {
        let s = generate_schedule(&params, &PrepaymentPlan::new()).unwrap();
        assert_eq!(s.final_month_count, params.total_months, "{params:?}");
        assert_eq!(s.final_balance(), Decimal::ZERO, "{params:?}");
        assert_close(amortized(&s), params.principal, dec!(0.000000001));
        assert!(s.rows.iter().all(|r| r.principal_paid >= Decimal::ZERO));
        assert!(s
            .rows
            .windows(2)
            .all(|w| w[1].ending_balance <= w[0].ending_balance));
    }
}

#[test]
fn test_high_rate_long_term_with_prepayment() {
    let plan: PrepaymentPlan = [(600, dec!(10_000))].into_iter().collect();
    let s = generate_schedule(&loan(dec!(100_000), dec!(100), 1200), &plan).unwrap();
    assert_eq!(s.final_month_count, 1200);
    assert_eq!(s.final_balance(), Decimal::ZERO);
    assert_eq!(s.total_prepaid, dec!(10_000));
    assert_close(amortized(&s), dec!(100_000), dec!(0.000000001));
}
