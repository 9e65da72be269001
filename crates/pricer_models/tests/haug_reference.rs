//! Reference values for the eight single-barrier variants.
//!
//! Haug, "The Complete Guide to Option Pricing Formulas", standard barrier
//! table: S = 100, r = 0.08, b = 0.04, T = 0.5, σ = 0.25, rebate = 3.

use approx::assert_relative_eq;
use pricer_models::analytical::BarrierPricer;
use pricer_models::instruments::{BarrierKind, OptionKind, OptionParameters};

const STRIKES: [f64; 3] = [90.0, 100.0, 110.0];

fn check(option: OptionKind, barrier_kind: BarrierKind, barrier: f64, expected: [f64; 3]) {
    let pricer = BarrierPricer::default();
    for (strike, expected) in STRIKES.iter().zip(expected) {
        let params = OptionParameters::builder()
            .option_kind(option)
            .barrier_kind(barrier_kind)
            .spot(100.0)
            .strike(*strike)
            .barrier(barrier)
            .rate(0.08)
            .carry(0.04)
            .volatility(0.25)
            .time_to_expiry(0.5)
            .rebate(3.0)
            .build()
            .unwrap();

        let price = pricer.price(&params).unwrap();
        assert!(
            (price - expected).abs() < 1e-3,
            "{} {} H={} K={}: got {:.6}, expected {}",
            barrier_kind,
            option,
            barrier,
            strike,
            price,
            expected
        );
    }
}

// ==========================================================
// Knock-out
// ==========================================================

#[test]
fn test_down_and_out_call() {
    check(OptionKind::Call, BarrierKind::DownOut, 95.0, [9.0246, 6.7924, 4.8759]);
    check(OptionKind::Call, BarrierKind::DownOut, 100.0, [3.0000, 3.0000, 3.0000]);
}

#[test]
fn test_up_and_out_call() {
    check(OptionKind::Call, BarrierKind::UpOut, 105.0, [2.6789, 2.3580, 2.3453]);
}

#[test]
fn test_down_and_out_put() {
    check(OptionKind::Put, BarrierKind::DownOut, 95.0, [2.2798, 2.2947, 2.6252]);
    check(OptionKind::Put, BarrierKind::DownOut, 100.0, [3.0000, 3.0000, 3.0000]);
}

#[test]
fn test_up_and_out_put() {
    check(OptionKind::Put, BarrierKind::UpOut, 105.0, [3.7760, 5.4932, 7.5187]);
}

// ==========================================================
// Knock-in
// ==========================================================

#[test]
fn test_down_and_in_call() {
    check(OptionKind::Call, BarrierKind::DownIn, 95.0, [7.7627, 4.0109, 2.0576]);
    check(OptionKind::Call, BarrierKind::DownIn, 100.0, [13.8333, 7.8494, 3.9795]);
}

#[test]
fn test_up_and_in_call() {
    check(OptionKind::Call, BarrierKind::UpIn, 105.0, [14.1112, 8.4482, 4.5910]);
}

#[test]
fn test_down_and_in_put() {
    check(OptionKind::Put, BarrierKind::DownIn, 95.0, [2.9586, 6.5677, 11.9752]);
    check(OptionKind::Put, BarrierKind::DownIn, 100.0, [2.2845, 5.9085, 11.6465]);
}

#[test]
fn test_up_and_in_put() {
    check(OptionKind::Put, BarrierKind::UpIn, 105.0, [1.4653, 3.3721, 7.0846]);
}

// ==========================================================
// Diagnostics
// ==========================================================

#[test]
fn test_rebate_terms_at_barrier() {
    // At S = H a knock-out is worth exactly its rebate and E vanishes
    let params = OptionParameters::new(
        OptionKind::Call,
        BarrierKind::DownOut,
        100.0,
        100.0,
        100.0,
        0.08,
        0.04,
        0.25,
        0.5,
    )
    .with_rebate(3.0);

    let terms = BarrierPricer::default().terms(&params).unwrap();
    assert_relative_eq!(terms.f, 3.0, epsilon = 1e-12);
    assert_relative_eq!(terms.e, 0.0, epsilon = 1e-12);
    assert_relative_eq!(terms.a, terms.c, epsilon = 1e-12);
}
