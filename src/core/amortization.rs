use tracing::debug;

use super::payment::{apply_monthly_payment, monthly_rate};
use super::types::{AmortizationRequest, ChartPoint};

// 60 years.
pub const MAX_MONTHS: u32 = 720;
pub const SAMPLE_INTERVAL_MONTHS: u32 = 6;

pub fn run_amortization_schedule(request: &AmortizationRequest) -> Vec<ChartPoint> {
    let r = monthly_rate(request.interest_rate);
    if request.monthly_payment <= request.mortgage_balance * r {
        debug!(
            balance = request.mortgage_balance,
            payment = request.monthly_payment,
            "payment does not cover interest; empty schedule"
        );
        return Vec::new();
    }

    let baseline_payment = request.monthly_payment;
    let accelerated_payment = request.monthly_payment + request.extra_principal_monthly;

    let mut baseline = request.mortgage_balance;
    let mut accelerated = request.mortgage_balance;
    let mut points = vec![ChartPoint {
        x: 0,
        baseline,
        accelerated,
    }];

    for month in 1..=MAX_MONTHS {
        let mut paid_off_this_month = false;

        if baseline > 0.0 {
            baseline = apply_monthly_payment(baseline, r, baseline_payment);
            paid_off_this_month |= baseline == 0.0;
        }
        if accelerated > 0.0 {
            accelerated = apply_monthly_payment(accelerated, r, accelerated_payment);
            paid_off_this_month |= accelerated == 0.0;
        }

        if month % SAMPLE_INTERVAL_MONTHS == 0 || paid_off_this_month {
            points.push(ChartPoint {
                x: month,
                baseline: round_cents(baseline),
                accelerated: round_cents(accelerated),
            });
        }

        if baseline == 0.0 && accelerated == 0.0 {
            break;
        }
    }

    debug!(points = points.len(), "amortization schedule computed");
    points
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::monthly_payment;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    fn request(balance: f64, rate: f64, payment: f64, extra: f64) -> AmortizationRequest {
        AmortizationRequest {
            mortgage_balance: balance,
            interest_rate: rate,
            monthly_payment: payment,
            extra_principal_monthly: extra,
        }
    }

    fn first_zero_month(points: &[ChartPoint], pick: fn(&ChartPoint) -> f64) -> Option<u32> {
        points.iter().find(|p| pick(p) == 0.0).map(|p| p.x)
    }

    #[test]
    fn interest_only_payment_yields_empty_schedule() {
        // 200k at 6% accrues 1000 of interest in month one.
        assert!(run_amortization_schedule(&request(200_000.0, 6.0, 999.0, 0.0)).is_empty());
        assert!(run_amortization_schedule(&request(200_000.0, 6.0, 900.0, 500.0)).is_empty());
    }

    #[test]
    fn thirty_year_loan_pays_off_near_month_360() {
        let points = run_amortization_schedule(&request(200_000.0, 6.0, 1199.10, 0.0));

        let first = points[0];
        assert_eq!(first.x, 0);
        assert_eq!(first.baseline, 200_000.0);
        assert_eq!(first.accelerated, 200_000.0);

        let last = points[points.len() - 1];
        assert!((355..=366).contains(&last.x), "paid off at month {}", last.x);
        assert_eq!(last.baseline, 0.0);
        assert_eq!(last.accelerated, 0.0);

        for point in &points[..points.len() - 1] {
            assert_eq!(point.x % SAMPLE_INTERVAL_MONTHS, 0);
            assert_eq!(point.baseline, point.accelerated);
        }
        assert!(points.iter().any(|p| p.x == 354 && p.baseline > 0.0));
    }

    #[test]
    fn extra_principal_pays_off_sooner_and_emits_payoff_month() {
        let payment = monthly_payment(150_000.0, 6.5, 30);
        let points = run_amortization_schedule(&request(150_000.0, 6.5, payment, 400.0));

        let accelerated_done =
            first_zero_month(&points, |p| p.accelerated).expect("accelerated pays off");
        let baseline_done =
            first_zero_month(&points, |p| p.baseline).expect("baseline pays off");
        assert!(accelerated_done < baseline_done);

        let after_payoff: Vec<_> = points.iter().filter(|p| p.x > accelerated_done).collect();
        for point in after_payoff.iter().take(after_payoff.len() - 1) {
            assert_eq!(point.x % SAMPLE_INTERVAL_MONTHS, 0);
            assert_eq!(point.accelerated, 0.0);
        }
    }

    #[test]
    fn balances_are_rounded_to_cents_after_month_zero() {
        let points = run_amortization_schedule(&request(123_456.789, 5.25, 900.0, 0.0));
        assert_eq!(points[0].baseline, 123_456.789);
        for point in &points[1..] {
            let cents = point.baseline * 100.0;
            assert!((cents - cents.round()).abs() < 1e-6);
        }
    }

    #[test]
    fn slow_loan_stops_at_month_cap() {
        // Barely above interest-only: the balance is still open after 60 years.
        let points = run_amortization_schedule(&request(300_000.0, 6.0, 1_500.5, 0.0));
        let last = points[points.len() - 1];
        assert_eq!(last.x, MAX_MONTHS);
        assert!(last.baseline > 0.0);
        assert_eq!(points.len() as u32, MAX_MONTHS / SAMPLE_INTERVAL_MONTHS + 1);
    }

    #[test]
    fn capped_baseline_keeps_accelerated_payoff_sample() {
        // The extra 1000 clears the loan in month 184; the baseline runs to the cap.
        let points = run_amortization_schedule(&request(300_000.0, 6.0, 1_500.5, 1_000.0));

        let accelerated_done =
            first_zero_month(&points, |p| p.accelerated).expect("accelerated pays off");
        assert_eq!(accelerated_done, 184);
        assert_ne!(accelerated_done % SAMPLE_INTERVAL_MONTHS, 0);
        assert_eq!(first_zero_month(&points, |p| p.baseline), None);

        let last = points[points.len() - 1];
        assert_eq!(last.x, MAX_MONTHS);
        assert!(last.baseline > 0.0);
        assert_eq!(last.accelerated, 0.0);

        // 121 regular samples plus the off-grid payoff month.
        assert_eq!(points.len(), 122);
        assert_eq!(
            points.iter().filter(|p| p.x % SAMPLE_INTERVAL_MONTHS != 0).count(),
            1
        );
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(48))]

        #[test]
        fn prop_schedule_is_bounded_and_non_increasing(
            balance in 1_000u32..1_500_000,
            rate_bp in 25u32..1_200,
            years in 5i64..41,
            payment_markup_pct in 0u32..50,
            extra in 0u32..3_000
        ) {
            let balance = balance as f64;
            let rate = rate_bp as f64 / 100.0;
            let markup = 1.0 + payment_markup_pct as f64 / 100.0;
            let payment = monthly_payment(balance, rate, years) * markup;
            let points = run_amortization_schedule(&request(balance, rate, payment, extra as f64));

            prop_assert!(!points.is_empty());
            prop_assert!(points.len() as u32 <= MAX_MONTHS / SAMPLE_INTERVAL_MONTHS + 3);
            prop_assert_eq!(points[0].x, 0);

            for pair in points.windows(2) {
                prop_assert!(pair[1].x > pair[0].x);
                prop_assert!(pair[1].baseline <= pair[0].baseline);
                prop_assert!(pair[1].accelerated <= pair[0].accelerated);
            }
            for point in &points {
                prop_assert!(point.accelerated <= point.baseline);
            }

            let accelerated_done = first_zero_month(&points, |p| p.accelerated);
            let baseline_done = first_zero_month(&points, |p| p.baseline);
            if let Some(baseline_done) = baseline_done {
                prop_assert!(accelerated_done.is_some_and(|month| month <= baseline_done));
            }
        }
    }
}
