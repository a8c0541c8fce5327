//! Savitzky–Golay smoothing.
//!
//! Interior samples are smoothed by convolving with the least-squares
//! polynomial evaluation weights for a centered window; the first and
//! last half-window are taken from a polynomial fit over the leading
//! and trailing window respectively, so the trend stays defined over
//! the full series.

use nalgebra::{DMatrix, DVector};

/// Smooth `values` with window length `window` (forced odd) and the
/// given polynomial order.
///
/// Returns `None` when the series is shorter than the window, the
/// order does not fit the window, or the normal equations are
/// degenerate; callers fall back to a cruder detrend in that case.
#[must_use]
pub fn savgol_filter(values: &[f64], window: usize, polyorder: usize) -> Option<Vec<f64>> {
    let window = if window % 2 == 0 { window + 1 } else { window };
    if window < 3 || polyorder + 1 >= window || values.len() < window {
        return None;
    }
    let half = window / 2;
    let n = values.len();
    let weights = center_weights(window, polyorder)?;

    let mut trend = vec![0.0; n];
    for i in half..n - half {
        let mut acc = 0.0;
        for (k, weight) in weights.iter().enumerate() {
            acc += weight * values[i - half + k];
        }
        trend[i] = acc;
    }

    let head = polyfit_eval(&values[..window], polyorder, 0..half)?;
    trend[..half].copy_from_slice(&head);
    let tail = polyfit_eval(&values[n - window..], polyorder, (window - half)..window)?;
    trend[n - half..].copy_from_slice(&tail);
    Some(trend)
}

/// Weights evaluating the windowed least-squares polynomial at the
/// window center: row 0 of `(A^T A)^-1 A^T` for the centered design
/// matrix `A[k][j] = (k - half)^j`.
fn center_weights(window: usize, polyorder: usize) -> Option<Vec<f64>> {
    let m = polyorder + 1;
    let half = (window / 2) as f64;
    let design = DMatrix::from_fn(window, m, |k, j| ((k as f64) - half).powi(j as i32));
    let normal = design.transpose() * &design;
    let inverse = normal.try_inverse()?;
    let mut weights = Vec::with_capacity(window);
    for k in 0..window {
        let mut acc = 0.0;
        for j in 0..m {
            acc += inverse[(0, j)] * design[(k, j)];
        }
        weights.push(acc);
    }
    Some(weights)
}

/// Fit one polynomial to `ys` over x = 0..len and evaluate it at the
/// given integer positions.
fn polyfit_eval(
    ys: &[f64],
    polyorder: usize,
    positions: std::ops::Range<usize>,
) -> Option<Vec<f64>> {
    let m = polyorder + 1;
    let n = ys.len();
    let design = DMatrix::from_fn(n, m, |k, j| (k as f64).powi(j as i32));
    let rhs = DVector::from_row_slice(ys);
    let normal = design.transpose() * &design;
    let projected = design.transpose() * rhs;
    let beta = normal.lu().solve(&projected)?;
    Some(
        positions
            .map(|x| {
                let x = x as f64;
                (0..m).map(|j| beta[j] * x.powi(j as i32)).sum()
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_series_is_its_own_trend() {
        let values = vec![2.5; 50];
        let trend = savgol_filter(&values, 11, 3).expect("filter runs");
        for value in trend {
            assert!((value - 2.5).abs() < 1e-9);
        }
    }

    #[test]
    fn linear_ramp_is_reproduced_exactly_including_edges() {
        let values: Vec<f64> = (0..60).map(|i| 0.5 * i as f64 + 3.0).collect();
        let trend = savgol_filter(&values, 15, 3).expect("filter runs");
        for (i, value) in trend.iter().enumerate() {
            let expected = 0.5 * i as f64 + 3.0;
            assert!((value - expected).abs() < 1e-8, "index {i}");
        }
    }

    #[test]
    fn even_window_is_bumped_to_odd() {
        let values: Vec<f64> = (0..40).map(|i| (i as f64).sin()).collect();
        let even = savgol_filter(&values, 10, 3).expect("even window accepted");
        let odd = savgol_filter(&values, 11, 3).expect("odd window");
        assert_eq!(even, odd);
    }

    #[test]
    fn short_series_is_rejected() {
        assert!(savgol_filter(&[1.0, 2.0, 3.0], 11, 3).is_none());
    }
}
