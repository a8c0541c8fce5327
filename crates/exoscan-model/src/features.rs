//! Catalog feature extraction.
//!
//! Projects a normalized candidate onto the fixed 13-element vector the
//! scorer consumes. The projection is total: any field still missing
//! after normalization takes its documented default, so the output
//! never contains NaN.

use crate::candidate::Candidate;
use crate::field::{CanonicalField, field_default};

/// Length of the catalog feature vector.
pub const FEATURE_LEN: usize = 13;

/// Impact parameter slot. The column matcher never maps it from source
/// tables, so it is a constant in catalog mode.
const DEFAULT_IMPACT: f64 = 0.0;

/// Extract the canonical 13-element feature vector.
///
/// Order: period, epoch, impact, duration, depth, radius, temperature,
/// insolation, surface gravity, stellar radius, stellar temperature,
/// stellar mass, stellar age.
#[must_use]
pub fn catalog_features(candidate: &Candidate) -> [f64; FEATURE_LEN] {
    [
        candidate.period.unwrap_or(0.0),
        candidate.epoch.unwrap_or(0.0),
        DEFAULT_IMPACT,
        value_or_default(candidate, CanonicalField::Duration),
        value_or_default(candidate, CanonicalField::Depth),
        value_or_default(candidate, CanonicalField::Radius),
        value_or_default(candidate, CanonicalField::Temperature),
        value_or_default(candidate, CanonicalField::Insolation),
        value_or_default(candidate, CanonicalField::SurfaceGravity),
        value_or_default(candidate, CanonicalField::StellarRadius),
        value_or_default(candidate, CanonicalField::StellarTemperature),
        value_or_default(candidate, CanonicalField::StellarMass),
        value_or_default(candidate, CanonicalField::StellarAge),
    ]
}

fn value_or_default(candidate: &Candidate, field: CanonicalField) -> f64 {
    candidate
        .get(field)
        .filter(|value| value.is_finite())
        .or_else(|| field_default(field))
        .unwrap_or(0.0)
}
