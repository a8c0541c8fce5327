//! A single transit candidate after column normalization.

use serde::{Deserialize, Serialize};

use crate::field::CanonicalField;

/// One row of a catalog mapped onto the canonical schema.
///
/// Numeric fields are `None` when the source cell was absent or failed
/// numeric coercion and no default applied. The identifier is always
/// present; the normalizer synthesizes one when the table carries no
/// identifier column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub identifier: String,
    pub period: Option<f64>,
    pub epoch: Option<f64>,
    pub depth: Option<f64>,
    pub duration: Option<f64>,
    pub radius: Option<f64>,
    pub temperature: Option<f64>,
    pub insolation: Option<f64>,
    pub surface_gravity: Option<f64>,
    pub stellar_radius: Option<f64>,
    pub stellar_temperature: Option<f64>,
    pub stellar_mass: Option<f64>,
    pub stellar_age: Option<f64>,
}

impl Candidate {
    /// Read a numeric field by schema name.
    ///
    /// `Identifier` is not numeric and always returns `None` here; use
    /// the `identifier` field directly.
    #[must_use]
    pub fn get(&self, field: CanonicalField) -> Option<f64> {
        match field {
            CanonicalField::Identifier => None,
            CanonicalField::Period => self.period,
            CanonicalField::Epoch => self.epoch,
            CanonicalField::Depth => self.depth,
            CanonicalField::Duration => self.duration,
            CanonicalField::Radius => self.radius,
            CanonicalField::Temperature => self.temperature,
            CanonicalField::Insolation => self.insolation,
            CanonicalField::SurfaceGravity => self.surface_gravity,
            CanonicalField::StellarRadius => self.stellar_radius,
            CanonicalField::StellarTemperature => self.stellar_temperature,
            CanonicalField::StellarMass => self.stellar_mass,
            CanonicalField::StellarAge => self.stellar_age,
        }
    }

    /// Write a numeric field by schema name. Ignores `Identifier`.
    pub fn set(&mut self, field: CanonicalField, value: Option<f64>) {
        let slot = match field {
            CanonicalField::Identifier => return,
            CanonicalField::Period => &mut self.period,
            CanonicalField::Epoch => &mut self.epoch,
            CanonicalField::Depth => &mut self.depth,
            CanonicalField::Duration => &mut self.duration,
            CanonicalField::Radius => &mut self.radius,
            CanonicalField::Temperature => &mut self.temperature,
            CanonicalField::Insolation => &mut self.insolation,
            CanonicalField::SurfaceGravity => &mut self.surface_gravity,
            CanonicalField::StellarRadius => &mut self.stellar_radius,
            CanonicalField::StellarTemperature => &mut self.stellar_temperature,
            CanonicalField::StellarMass => &mut self.stellar_mass,
            CanonicalField::StellarAge => &mut self.stellar_age,
        };
        *slot = value;
    }

    /// True when the candidate can be phase-folded: both period and
    /// epoch are present and strictly positive.
    #[must_use]
    pub fn has_valid_ephemeris(&self) -> bool {
        matches!(self.period, Some(p) if p > 0.0) && matches!(self.epoch, Some(e) if e > 0.0)
    }
}
