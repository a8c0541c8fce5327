//! Integration tests: detrend + fold over synthetic light curves.

use exoscan_curve::{DetrendOptions, FoldOptions, detrend, fold};
use exoscan_model::LightCurve;
use proptest::prelude::*;

fn mean_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, var.sqrt())
}

/// Synthetic curve with a transit-like dip at every epoch crossing.
fn dipped_curve(n: usize, dt: f64, period: f64, epoch: f64) -> LightCurve {
    let time: Vec<f64> = (0..n).map(|i| i as f64 * dt).collect();
    let flux: Vec<f64> = time
        .iter()
        .map(|t| {
            let phase = (t - epoch + 0.5 * period).rem_euclid(period) / period - 0.5;
            1.0 - 0.02 * (-(phase / 0.03).powi(2)).exp()
        })
        .collect();
    LightCurve {
        identifier: "synthetic".to_string(),
        time,
        flux,
        period,
        epoch,
    }
}

#[test]
fn injected_dip_folds_to_the_window_center() {
    let curve = dipped_curve(500, 0.0997, 2.0, 10.0);
    let folded = fold(&curve, &FoldOptions::default()).expect("folds");
    assert_eq!(folded.len(), 201);
    assert!(folded.iter().all(|v| v.is_finite()));

    let (mean, std) = mean_std(&folded);
    assert!(mean.abs() < 1e-9);
    assert!((std - 1.0).abs() < 1e-9);

    let (min_index, _) = folded
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.partial_cmp(b.1).expect("finite"))
        .expect("non-empty");
    assert!(
        (min_index as i64 - 100).abs() <= 5,
        "dip at index {min_index}, expected near 100"
    );
}

#[test]
fn folding_is_invariant_under_whole_period_time_shifts() {
    let base = dipped_curve(400, 0.1003, 2.0, 10.0);
    let shifted = LightCurve {
        time: base.time.iter().map(|t| t + 3.0 * base.period).collect(),
        ..base.clone()
    };
    let folded_base = fold(&base, &FoldOptions::default()).expect("folds");
    let folded_shifted = fold(&shifted, &FoldOptions::default()).expect("folds");
    for (a, b) in folded_base.iter().zip(&folded_shifted) {
        assert!((a - b).abs() < 1e-6, "{a} vs {b}");
    }
}

#[test]
fn detrended_dip_survives_folding() {
    // Add a slow linear drift on top of the dip; detrending removes
    // the drift, folding still centers the dip.
    let curve = dipped_curve(600, 0.0997, 2.0, 10.0);
    let drifted: Vec<f64> = curve
        .flux
        .iter()
        .zip(&curve.time)
        .map(|(flux, time)| flux * (1000.0 + 0.5 * time))
        .collect();
    let residual = detrend(&drifted, &DetrendOptions::default());
    let detrended = LightCurve {
        flux: residual,
        ..curve.clone()
    };
    let folded = fold(&detrended, &FoldOptions::default()).expect("folds");
    let (min_index, _) = folded
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.partial_cmp(b.1).expect("finite"))
        .expect("non-empty");
    assert!((min_index as i64 - 100).abs() <= 8, "dip at {min_index}");
}

#[test]
fn custom_output_length_is_respected() {
    let curve = dipped_curve(300, 0.11, 2.0, 10.0);
    let folded = fold(&curve, &FoldOptions::default().with_out_len(64)).expect("folds");
    assert_eq!(folded.len(), 64);
}

proptest! {
    /// Output invariants hold for arbitrary noisy inputs: fixed
    /// length, finite values, zero mean, unit (or zero) deviation.
    #[test]
    fn fold_output_invariants(
        period in 0.5f64..10.0,
        epoch in 1.0f64..100.0,
        flux in proptest::collection::vec(0.9f64..1.1, 50..300),
    ) {
        let n = flux.len();
        let time: Vec<f64> = (0..n).map(|i| i as f64 * 0.037).collect();
        let curve = LightCurve {
            identifier: "prop".to_string(),
            time,
            flux,
            period,
            epoch,
        };
        let folded = fold(&curve, &FoldOptions::default()).expect("folds");
        prop_assert_eq!(folded.len(), 201);
        prop_assert!(folded.iter().all(|v| v.is_finite()));
        let (mean, std) = mean_std(&folded);
        prop_assert!(mean.abs() < 1e-9);
        prop_assert!((std - 1.0).abs() < 1e-9 || std < 1e-12);
    }
}
