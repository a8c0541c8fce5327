//! Long-term trend removal from raw flux series.

use tracing::debug;

use crate::savgol::savgol_filter;
use crate::stats::median;

/// Detrend tunables.
#[derive(Debug, Clone, Copy)]
pub struct DetrendOptions {
    /// Smoothing window length; forced odd when even.
    pub window: usize,
    /// Polynomial order of the moving fit.
    pub polyorder: usize,
}

impl Default for DetrendOptions {
    fn default() -> Self {
        Self {
            window: 101,
            polyorder: 3,
        }
    }
}

impl DetrendOptions {
    #[must_use]
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }
}

/// Remove the slow trend, returning the normalized residual
/// `flux / trend - 1`.
///
/// Series shorter than the window, or a degenerate fit, fall back to
/// plain median subtraction.
#[must_use]
pub fn detrend(flux: &[f64], options: &DetrendOptions) -> Vec<f64> {
    match savgol_filter(flux, options.window, options.polyorder) {
        Some(trend) => flux
            .iter()
            .zip(&trend)
            .map(|(value, trend)| value / trend - 1.0)
            .collect(),
        None => {
            debug!(
                len = flux.len(),
                window = options.window,
                "series too short for smoothing, subtracting median"
            );
            let center = median(flux).unwrap_or(0.0);
            flux.iter().map(|value| value - center).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_curve_detrends_to_zero() {
        let flux = vec![1000.0; 300];
        let residual = detrend(&flux, &DetrendOptions::default());
        assert!(residual.iter().all(|value| value.abs() < 1e-9));
    }

    #[test]
    fn linear_drift_is_removed() {
        let flux: Vec<f64> = (0..300).map(|i| 1000.0 + 0.1 * i as f64).collect();
        let residual = detrend(&flux, &DetrendOptions::default());
        for (i, value) in residual.iter().enumerate() {
            assert!(value.abs() < 1e-6, "index {i}: {value}");
        }
    }

    #[test]
    fn short_series_falls_back_to_median_subtraction() {
        let flux = vec![5.0, 7.0, 9.0];
        let residual = detrend(&flux, &DetrendOptions::default());
        assert_eq!(residual, vec![-2.0, 0.0, 2.0]);
    }
}
