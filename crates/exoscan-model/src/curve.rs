//! Raw light-curve sample for the time-series path.

use serde::{Deserialize, Serialize};

use crate::error::CurveError;

/// A brightness time-series with the ephemeris needed to fold it.
///
/// Time and flux are parallel arrays; ascending time is not required.
/// Constructed once per sample and consumed by detrend + fold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightCurve {
    pub identifier: String,
    pub time: Vec<f64>,
    pub flux: Vec<f64>,
    /// Orbital period in days, strictly positive.
    pub period: f64,
    /// Transit reference epoch, strictly positive.
    pub epoch: f64,
}

impl LightCurve {
    /// Build a light curve, rejecting structurally invalid input up
    /// front so the fold stage only sees usable series.
    pub fn new(
        identifier: impl Into<String>,
        time: Vec<f64>,
        flux: Vec<f64>,
        period: f64,
        epoch: f64,
    ) -> Result<Self, CurveError> {
        if time.len() != flux.len() {
            return Err(CurveError::MismatchedLengths {
                time: time.len(),
                flux: flux.len(),
            });
        }
        if time.is_empty() {
            return Err(CurveError::EmptySeries);
        }
        if !(period > 0.0) || !(epoch > 0.0) {
            return Err(CurveError::InvalidEphemeris { period, epoch });
        }
        Ok(Self {
            identifier: identifier.into(),
            time,
            flux,
            period,
            epoch,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}
