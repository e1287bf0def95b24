//! Property-based tests for the rho kernel.
//!
//! - closed forms at beta = 0 and cdot = -1, 0, 1
//! - finiteness and sign on the valid domain
//! - agreement between checked, unchecked and batch evaluation
//! - continuity away from the domain boundary

use proptest::prelude::*;
use rho_kernel::config::BatchConfig;
use rho_kernel::{
    calc_rho, is_in_domain, radicand, try_calc_rho, DomainPolicy, RhoCalculator, RhoConfig,
    RhoError,
};

// Keeps beta^2 and cdot^2 well inside f64 range.
const LIMIT: f64 = 1e6;

proptest! {
    #[test]
    fn prop_zero_beta_is_one(cdot in -LIMIT..LIMIT) {
        prop_assert_eq!(calc_rho(cdot, 0.0), 1.0);
    }

    #[test]
    fn prop_unit_cdot_closed_forms(beta in -LIMIT..LIMIT) {
        prop_assert_eq!(calc_rho(1.0, beta), 1.0 - beta);
        prop_assert_eq!(calc_rho(-1.0, beta), 1.0 + beta);
    }

    #[test]
    fn prop_zero_cdot_closed_form(beta in -1.0f64..=1.0) {
        prop_assert_eq!(calc_rho(0.0, beta), (1.0 - beta * beta).sqrt());
    }

    #[test]
    fn prop_radicand_bounded_on_unit_interval(cdot in -1.0f64..=1.0, beta in -LIMIT..LIMIT) {
        prop_assert!(radicand(cdot, beta) <= 1.0);
    }

    #[test]
    fn prop_finite_and_non_negative_for_small_beta(cdot in -1.0f64..=1.0, beta in -1.0f64..=1.0) {
        let rho = calc_rho(cdot, beta);
        prop_assert!(rho.is_finite());
        prop_assert!(rho >= -1e-12, "rho({}, {}) = {}", cdot, beta, rho);
        prop_assert!(is_in_domain(cdot, beta));
    }

    #[test]
    fn prop_checked_agrees_with_unchecked(cdot in -10.0f64..10.0, beta in -10.0f64..10.0) {
        let unchecked = calc_rho(cdot, beta);
        match try_calc_rho(cdot, beta) {
            Ok(rho) => {
                prop_assert!(is_in_domain(cdot, beta));
                prop_assert_eq!(rho.to_bits(), unchecked.to_bits());
            }
            Err(RhoError::NegativeRadicand { radicand: r, .. }) => {
                prop_assert!(r < 0.0);
                prop_assert!(!is_in_domain(cdot, beta));
                prop_assert!(unchecked.is_nan());
            }
            Err(e) => prop_assert!(false, "unexpected error {}", e),
        }
    }

    #[test]
    fn prop_continuous_inside_domain(cdot in -0.9f64..0.9, beta in -0.9f64..0.9) {
        let h = 1e-9;
        let rho = calc_rho(cdot, beta);
        prop_assert!((calc_rho(cdot + h, beta) - rho).abs() < 1e-6);
        prop_assert!((calc_rho(cdot, beta + h) - rho).abs() < 1e-6);
    }

    #[test]
    fn prop_batch_matches_scalar(
        pairs in prop::collection::vec((-2.0f64..2.0, -2.0f64..2.0), 0..256),
        threshold in 1usize..64,
    ) {
        let (cdots, betas): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        let calculator = RhoCalculator::new(RhoConfig {
            batch: BatchConfig { enable_parallel: true, parallel_threshold: threshold },
            ..Default::default()
        });

        let rhos = calculator.rho_batch(&cdots, &betas).unwrap();
        prop_assert_eq!(rhos.len(), cdots.len());
        for i in 0..cdots.len() {
            prop_assert_eq!(rhos[i].to_bits(), calc_rho(cdots[i], betas[i]).to_bits());
        }
    }

    #[test]
    fn prop_reject_batch_fails_iff_any_out_of_domain(
        cdots in prop::collection::vec(prop_oneof![-2.0f64..2.0, -1e200f64..1e200], 1..128),
        beta in prop_oneof![-3.0f64..3.0, -1e200f64..1e200],
    ) {
        let calculator = RhoCalculator::with_policy(DomainPolicy::Reject);
        let first_bad = cdots.iter().position(|&c| !is_in_domain(c, beta));

        match calculator.rho_batch_with_beta(&cdots, beta) {
            Ok(rhos) => {
                prop_assert_eq!(first_bad, None);
                prop_assert!(rhos.iter().all(|r| r.is_finite()));
            }
            Err(e) => {
                prop_assert!(first_bad.is_some());
                prop_assert_eq!(e.index(), first_bad);
                prop_assert!(
                    !matches!(e, RhoError::NonFiniteInput { .. }),
                    "finite inputs reported as non-finite: {}", e
                );
            }
        }
    }
}

#[test]
fn reference_domain_violation() {
    assert_eq!(radicand(0.5, 10.0), -74.0);
    assert!(calc_rho(0.5, 10.0).is_nan());
    assert!(matches!(
        RhoCalculator::with_policy(DomainPolicy::Reject).rho(0.5, 10.0),
        Err(RhoError::NegativeRadicand { .. })
    ));
}
