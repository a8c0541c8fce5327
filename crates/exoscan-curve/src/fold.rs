//! Phase folding and resampling onto a fixed-length grid.

use tracing::debug;

use exoscan_model::{CurveError, LightCurve};

use crate::stats::{mean_std, median};

/// Fold tunables.
#[derive(Debug, Clone, Copy)]
pub struct FoldOptions {
    /// Phase half-width kept around the transit center, as a fraction
    /// of the period.
    pub width: f64,
    /// Output grid length.
    pub out_len: usize,
    /// Minimum in-window samples before falling back to the full
    /// series.
    pub min_in_window: usize,
}

impl Default for FoldOptions {
    fn default() -> Self {
        Self {
            width: 0.1,
            out_len: 201,
            min_in_window: 10,
        }
    }
}

impl FoldOptions {
    #[must_use]
    pub fn with_out_len(mut self, out_len: usize) -> Self {
        self.out_len = out_len;
        self
    }

    #[must_use]
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }
}

/// Fold a light curve onto its period and resample the transit window
/// onto `out_len` uniform phase points, normalized to zero mean and
/// unit standard deviation.
///
/// The output never contains NaN and always has length `out_len`.
pub fn fold(curve: &LightCurve, options: &FoldOptions) -> Result<Vec<f64>, CurveError> {
    if curve.time.len() != curve.flux.len() {
        return Err(CurveError::MismatchedLengths {
            time: curve.time.len(),
            flux: curve.flux.len(),
        });
    }
    if curve.time.is_empty() {
        return Err(CurveError::EmptySeries);
    }
    if !(curve.period > 0.0) || !(curve.epoch > 0.0) {
        return Err(CurveError::InvalidEphemeris {
            period: curve.period,
            epoch: curve.epoch,
        });
    }
    let out_len = options.out_len.max(2);
    let width = options.width;

    // Transit center sits at phase 0, phase spans one period.
    let pairs: Vec<(f64, f64)> = curve
        .time
        .iter()
        .zip(&curve.flux)
        .filter(|(time, flux)| time.is_finite() && flux.is_finite())
        .map(|(time, flux)| {
            let phase =
                (time - curve.epoch + 0.5 * curve.period).rem_euclid(curve.period) / curve.period
                    - 0.5;
            (phase, *flux)
        })
        .collect();
    if pairs.is_empty() {
        return Err(CurveError::EmptySeries);
    }

    let mut kept: Vec<(f64, f64)> = pairs
        .iter()
        .copied()
        .filter(|(phase, _)| phase.abs() <= width)
        .collect();
    if kept.len() < options.min_in_window {
        debug!(
            in_window = kept.len(),
            total = pairs.len(),
            "sparse transit window, folding full series"
        );
        kept = pairs;
    }
    kept.sort_unstable_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    let grid: Vec<f64> = (0..out_len)
        .map(|i| -width + 2.0 * width * (i as f64) / ((out_len - 1) as f64))
        .collect();

    // Samples from different orbits can land on the same phase; merge
    // exact duplicates by averaging so interpolation sees a strictly
    // increasing axis.
    let merged = merge_equal_phases(&kept);
    let mut resampled: Vec<f64> = if merged.len() >= 2 {
        grid.iter().map(|x| interp_or_missing(*x, &merged)).collect()
    } else {
        debug!("degenerate phase values, using uniform-index interpolation");
        uniform_index_interp(&grid, &kept)
    };

    // Grid points outside the sampled phase range were marked missing
    // rather than extrapolated; fill them with the output median.
    let finite: Vec<f64> = resampled.iter().copied().filter(|v| v.is_finite()).collect();
    let fill = median(&finite).unwrap_or(0.0);
    for value in &mut resampled {
        if !value.is_finite() {
            *value = fill;
        }
    }

    let (mean, std) = mean_std(&resampled);
    let scale = if std > 0.0 { std } else { 1.0 };
    Ok(resampled.iter().map(|value| (value - mean) / scale).collect())
}

/// Collapse runs of identical phases (input sorted by phase) into one
/// sample holding the mean flux.
fn merge_equal_phases(pairs: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let mut merged: Vec<(f64, f64)> = Vec::with_capacity(pairs.len());
    let mut count = 0usize;
    for (phase, flux) in pairs {
        match merged.last_mut() {
            Some((last_phase, acc)) if *last_phase == *phase => {
                *acc = (*acc * count as f64 + flux) / (count as f64 + 1.0);
                count += 1;
            }
            _ => {
                merged.push((*phase, *flux));
                count = 1;
            }
        }
    }
    merged
}

/// Linear interpolation over strictly increasing (phase, flux) pairs;
/// queries outside the sampled range return NaN as a missing marker.
fn interp_or_missing(x: f64, pairs: &[(f64, f64)]) -> f64 {
    let first = pairs[0];
    let last = pairs[pairs.len() - 1];
    if x < first.0 || x > last.0 {
        return f64::NAN;
    }
    let upper = pairs.partition_point(|(phase, _)| *phase < x);
    if upper == 0 {
        return first.1;
    }
    if pairs[upper].0 == x {
        return pairs[upper].1;
    }
    let (x0, y0) = pairs[upper - 1];
    let (x1, y1) = pairs[upper];
    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
}

/// Fallback when phases are degenerate: spread the sorted samples over
/// the sampled phase span at uniform spacing and interpolate on that
/// synthetic axis, clamping at the ends.
fn uniform_index_interp(grid: &[f64], pairs: &[(f64, f64)]) -> Vec<f64> {
    let n = pairs.len();
    if n == 1 {
        return vec![pairs[0].1; grid.len()];
    }
    let lo = pairs[0].0;
    let hi = pairs[n - 1].0;
    if hi <= lo {
        let values: Vec<f64> = pairs.iter().map(|(_, flux)| *flux).collect();
        let center = median(&values).unwrap_or(0.0);
        return vec![center; grid.len()];
    }
    let step = (hi - lo) / ((n - 1) as f64);
    grid.iter()
        .map(|x| {
            if *x <= lo {
                return pairs[0].1;
            }
            if *x >= hi {
                return pairs[n - 1].1;
            }
            let position = (x - lo) / step;
            let index = position.floor() as usize;
            let frac = position - index as f64;
            let index = index.min(n - 2);
            pairs[index].1 + (pairs[index + 1].1 - pairs[index].1) * frac
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve(time: Vec<f64>, flux: Vec<f64>, period: f64, epoch: f64) -> LightCurve {
        LightCurve {
            identifier: "test".to_string(),
            time,
            flux,
            period,
            epoch,
        }
    }

    #[test]
    fn output_length_matches_options() {
        let time: Vec<f64> = (0..500).map(|i| i as f64 * 0.01).collect();
        let flux: Vec<f64> = time.iter().map(|t| (t * 3.0).sin()).collect();
        let folded = fold(&curve(time, flux, 2.0, 1.0), &FoldOptions::default()).expect("folds");
        assert_eq!(folded.len(), 201);
        assert!(folded.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn sparse_window_falls_back_to_full_series() {
        // Four samples, none guaranteed inside the narrow window.
        let time = vec![0.0, 0.3, 0.6, 0.9];
        let flux = vec![1.0, 2.0, 3.0, 4.0];
        let folded = fold(
            &curve(time, flux, 2.0, 1.0),
            &FoldOptions::default().with_width(0.01),
        )
        .expect("folds via fallback");
        assert_eq!(folded.len(), 201);
        assert!(folded.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn duplicate_phases_use_uniform_index_fallback() {
        // Identical timestamps collapse to one phase value.
        let time = vec![1.0; 20];
        let flux: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let folded = fold(&curve(time, flux, 2.0, 1.0), &FoldOptions::default()).expect("folds");
        assert_eq!(folded.len(), 201);
        assert!(folded.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn constant_flux_normalizes_to_zeros() {
        let time: Vec<f64> = (0..300).map(|i| i as f64 * 0.01).collect();
        let flux = vec![7.0; 300];
        let folded = fold(&curve(time, flux, 2.0, 1.0), &FoldOptions::default()).expect("folds");
        assert!(folded.iter().all(|v| v.abs() < 1e-12));
    }

    #[test]
    fn structural_errors_are_reported() {
        let bad = curve(vec![0.0, 1.0], vec![1.0], 2.0, 1.0);
        assert!(matches!(
            fold(&bad, &FoldOptions::default()),
            Err(CurveError::MismatchedLengths { .. })
        ));
        let empty = curve(Vec::new(), Vec::new(), 2.0, 1.0);
        assert!(matches!(
            fold(&empty, &FoldOptions::default()),
            Err(CurveError::EmptySeries)
        ));
    }
}
