//! Property-based checks of the transfer tax schedule.

use property_core::{compute_tax, TaxPolicy};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const UVT: Decimal = dec!(49700);

fn cents(n: i64) -> Decimal {
    Decimal::new(n, 2)
}

/// 20,000 UVT in cents
const LOW_CENTS: i64 = 20_000 * 49_700 * 100;
/// 30,000 UVT in cents (width of the mid bracket)
const MID_WIDTH_CENTS: i64 = 30_000 * 49_700 * 100;

proptest! {
    #[test]
    fn zero_band_owes_nothing(v in 0i64..LOW_CENTS) {
        prop_assert_eq!(compute_tax(cents(v)), Decimal::ZERO);
    }

    #[test]
    fn mid_band_taxes_excess(x in 0i64..=MID_WIDTH_CENTS) {
        let low = dec!(20000) * UVT;
        prop_assert_eq!(compute_tax(low + cents(x)), cents(x) * dec!(0.015));
    }

    #[test]
    fn high_band_taxes_excess_plus_surcharge(x in 1i64..1_000_000_000_000_000) {
        let high = dec!(50000) * UVT;
        prop_assert_eq!(
            compute_tax(high + cents(x)),
            cents(x) * dec!(0.03) + dec!(450) * UVT
        );
    }

    #[test]
    fn tax_is_monotonic(a in 0i64..1_000_000_000_000, b in 0i64..1_000_000_000_000) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(compute_tax(cents(lo)) <= compute_tax(cents(hi)));
    }

    #[test]
    fn continuous_at_thresholds(eps in 1i64..=100) {
        let policy = TaxPolicy::default();
        let eps = cents(eps);
        let tolerance = eps * dec!(0.05);

        for threshold in [policy.low_threshold(), policy.high_threshold()] {
            let below = policy.compute_tax(threshold - eps);
            let above = policy.compute_tax(threshold + eps);
            prop_assert!((above - below).abs() <= tolerance);
        }
    }

    #[test]
    fn tax_is_never_negative(v in -1_000_000_000_000i64..1_000_000_000_000_000) {
        prop_assert!(compute_tax(cents(v)) >= Decimal::ZERO);
    }
}

#[test]
fn documented_examples() {
    assert_eq!(compute_tax(dec!(500000000)), Decimal::ZERO);
    assert_eq!(compute_tax(dec!(1200000000)), dec!(3090000));
    assert_eq!(compute_tax(dec!(3000000000000)), dec!(89947815000));
}
