//! Canonical field schema for transit candidate catalogs.
//!
//! Every ingested table is normalized onto this fixed set of fields
//! before feature extraction. The set mirrors the Kepler Objects of
//! Interest cumulative catalog, but column matching is heuristic so
//! tables from other archives map onto the same schema.

use serde::{Deserialize, Serialize};

/// A recognized candidate field after column normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    /// Candidate identifier (KepID or synthesized).
    Identifier,
    /// Orbital period in days.
    Period,
    /// Transit reference epoch (BKJD).
    Epoch,
    /// Transit depth in ppm.
    Depth,
    /// Transit duration in hours.
    Duration,
    /// Planetary radius in Earth radii.
    Radius,
    /// Planetary equilibrium temperature in Kelvin.
    Temperature,
    /// Insolation flux relative to Earth.
    Insolation,
    /// Stellar surface gravity, log10(cm/s^2).
    SurfaceGravity,
    /// Stellar radius in solar radii.
    StellarRadius,
    /// Stellar effective temperature in Kelvin.
    StellarTemperature,
    /// Stellar mass in solar masses.
    StellarMass,
    /// Stellar age in Gyr.
    StellarAge,
}

/// Numeric fields in schema order. `Identifier` is excluded; it is the
/// only non-numeric field and is always present on a candidate.
pub const NUMERIC_FIELDS: [CanonicalField; 12] = [
    CanonicalField::Period,
    CanonicalField::Epoch,
    CanonicalField::Depth,
    CanonicalField::Duration,
    CanonicalField::Radius,
    CanonicalField::Temperature,
    CanonicalField::Insolation,
    CanonicalField::SurfaceGravity,
    CanonicalField::StellarRadius,
    CanonicalField::StellarTemperature,
    CanonicalField::StellarMass,
    CanonicalField::StellarAge,
];

impl CanonicalField {
    /// Stable lower-case name used in logs and the `fields` listing.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Identifier => "identifier",
            Self::Period => "period",
            Self::Epoch => "epoch",
            Self::Depth => "depth",
            Self::Duration => "duration",
            Self::Radius => "radius",
            Self::Temperature => "temperature",
            Self::Insolation => "insolation",
            Self::SurfaceGravity => "surface_gravity",
            Self::StellarRadius => "stellar_radius",
            Self::StellarTemperature => "stellar_temperature",
            Self::StellarMass => "stellar_mass",
            Self::StellarAge => "stellar_age",
        }
    }

    /// True for the two fields without which a candidate cannot be
    /// phase-folded or scored.
    #[must_use]
    pub fn is_required(self) -> bool {
        matches!(self, Self::Period | Self::Epoch)
    }
}

/// Default value substituted when a numeric field is absent from the
/// source table. Period and epoch have no default: rows missing them
/// are rejected rather than fabricated.
#[must_use]
pub fn field_default(field: CanonicalField) -> Option<f64> {
    match field {
        CanonicalField::Identifier | CanonicalField::Period | CanonicalField::Epoch => None,
        CanonicalField::Depth => Some(100.0),
        CanonicalField::Duration => Some(3.0),
        CanonicalField::Radius => Some(2.0),
        CanonicalField::Temperature => Some(600.0),
        CanonicalField::Insolation => Some(1.0),
        CanonicalField::SurfaceGravity => Some(4.4),
        CanonicalField::StellarRadius => Some(1.0),
        CanonicalField::StellarTemperature => Some(5700.0),
        CanonicalField::StellarMass => Some(1.0),
        CanonicalField::StellarAge => Some(4.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_fields_have_no_default() {
        for field in NUMERIC_FIELDS {
            assert_eq!(
                field.is_required(),
                field_default(field).is_none(),
                "{}",
                field.name()
            );
        }
    }

    #[test]
    fn field_names_are_unique() {
        let mut names: Vec<&str> = NUMERIC_FIELDS.iter().map(|f| f.name()).collect();
        names.push(CanonicalField::Identifier.name());
        let before = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), before);
    }
}
