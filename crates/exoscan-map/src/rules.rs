//! Ordered substring rules mapping source headers to canonical fields.
//!
//! Headers are lower-cased and trimmed, then checked against this
//! table top to bottom; the first matching rule wins and columns
//! matching no rule are dropped. The table is deliberately an explicit
//! constant rather than anything inferred at runtime, so matching is
//! deterministic and reviewable in one place.

use exoscan_model::CanonicalField;

/// A single header-matching rule.
#[derive(Debug, Clone, Copy)]
pub enum MatchRule {
    /// Header contains the substring.
    Contains(&'static str),
    /// Header contains both substrings (e.g. "time" and "0" for the
    /// transit epoch, matching `koi_time0bk` and `Time0` variants).
    ContainsAll(&'static str, &'static str),
    /// Header contains either substring.
    ContainsAny(&'static str, &'static str),
}

impl MatchRule {
    fn matches(self, header: &str) -> bool {
        match self {
            Self::Contains(needle) => header.contains(needle),
            Self::ContainsAll(a, b) => header.contains(a) && header.contains(b),
            Self::ContainsAny(a, b) => header.contains(a) || header.contains(b),
        }
    }
}

/// Rule table in evaluation order. Identifier is checked first so that
/// "kepid" is not claimed by a later numeric rule; age is checked last
/// because its "age" substring is the most collision-prone.
pub const FIELD_RULES: [(MatchRule, CanonicalField); 13] = [
    (
        MatchRule::ContainsAny("kepid", "id"),
        CanonicalField::Identifier,
    ),
    (MatchRule::Contains("period"), CanonicalField::Period),
    (MatchRule::ContainsAll("time", "0"), CanonicalField::Epoch),
    (MatchRule::Contains("depth"), CanonicalField::Depth),
    (MatchRule::Contains("duration"), CanonicalField::Duration),
    (
        MatchRule::ContainsAny("prad", "radius"),
        CanonicalField::Radius,
    ),
    (
        MatchRule::ContainsAny("teq", "temp"),
        CanonicalField::Temperature,
    ),
    (MatchRule::Contains("insol"), CanonicalField::Insolation),
    (
        MatchRule::ContainsAny("slogg", "logg"),
        CanonicalField::SurfaceGravity,
    ),
    (MatchRule::Contains("srad"), CanonicalField::StellarRadius),
    (
        MatchRule::ContainsAny("steff", "teff"),
        CanonicalField::StellarTemperature,
    ),
    (MatchRule::Contains("smass"), CanonicalField::StellarMass),
    (
        MatchRule::ContainsAny("sage", "age"),
        CanonicalField::StellarAge,
    ),
];

/// Match one source header against the rule table.
#[must_use]
pub fn match_field(header: &str) -> Option<CanonicalField> {
    let lowered = header.trim().to_lowercase();
    if lowered.is_empty() {
        return None;
    }
    FIELD_RULES
        .iter()
        .find(|(rule, _)| rule.matches(&lowered))
        .map(|(_, field)| *field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn koi_catalog_headers_map_onto_schema() {
        let cases = [
            ("kepid", CanonicalField::Identifier),
            ("koi_period", CanonicalField::Period),
            ("koi_time0bk", CanonicalField::Epoch),
            ("koi_depth", CanonicalField::Depth),
            ("koi_duration", CanonicalField::Duration),
            ("koi_prad", CanonicalField::Radius),
            ("koi_teq", CanonicalField::Temperature),
            ("koi_insol", CanonicalField::Insolation),
            ("koi_slogg", CanonicalField::SurfaceGravity),
            ("koi_srad", CanonicalField::StellarRadius),
            ("koi_steff", CanonicalField::StellarTemperature),
            ("koi_smass", CanonicalField::StellarMass),
            ("koi_sage", CanonicalField::StellarAge),
        ];
        for (header, expected) in cases {
            assert_eq!(match_field(header), Some(expected), "{header}");
        }
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(match_field("KepID"), Some(CanonicalField::Identifier));
        assert_eq!(match_field("Period"), Some(CanonicalField::Period));
        assert_eq!(match_field("Time0BK"), Some(CanonicalField::Epoch));
        assert_eq!(match_field(" TEFF "), Some(CanonicalField::StellarTemperature));
    }

    #[test]
    fn unknown_headers_match_nothing() {
        assert_eq!(match_field("koi_disposition"), None);
        assert_eq!(match_field("flux"), None);
        assert_eq!(match_field(""), None);
        // Impact parameter is intentionally unmapped; it enters the
        // feature vector as a constant.
        assert_eq!(match_field("koi_impact"), None);
    }

    #[test]
    fn first_rule_wins_on_ambiguous_headers() {
        // "id" beats any later substring.
        assert_eq!(match_field("period_id"), Some(CanonicalField::Identifier));
        // "temp" is claimed by temperature before stellar rules run.
        assert_eq!(match_field("temp_star"), Some(CanonicalField::Temperature));
    }
}
