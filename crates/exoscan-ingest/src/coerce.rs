//! Numeric coercion with missing-value semantics.
//!
//! Leaf utilities used by every stage above: textual cells become
//! finite floats or an explicit "missing", never NaN.

/// Tokens treated as missing regardless of case.
const MISSING_TOKENS: [&str; 7] = ["na", "n/a", "nan", "null", "none", "-", "--"];

/// True when a cell should be treated as a missing value.
#[must_use]
pub fn is_missing_value(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty()
        || MISSING_TOKENS
            .iter()
            .any(|token| trimmed.eq_ignore_ascii_case(token))
}

/// Parse a cell to a finite float. Missing tokens, parse failures and
/// non-finite results all map to `None`.
#[must_use]
pub fn parse_f64(raw: &str) -> Option<f64> {
    if is_missing_value(raw) {
        return None;
    }
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parse a cell to an integer with the same missing-value semantics.
#[must_use]
pub fn parse_i64(raw: &str) -> Option<i64> {
    if is_missing_value(raw) {
        return None;
    }
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .ok()
        .or_else(|| trimmed.parse::<f64>().ok().filter(|v| v.is_finite()).map(|v| v as i64))
}

/// Trim whitespace and a UTF-8 BOM from a data cell.
#[must_use]
pub fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Normalize a header: strip BOM and collapse internal whitespace.
#[must_use]
pub fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_scientific_floats() {
        assert_eq!(parse_f64("3.5"), Some(3.5));
        assert_eq!(parse_f64("  2.4583e6 "), Some(2458300.0));
        assert_eq!(parse_f64("-1"), Some(-1.0));
    }

    #[test]
    fn missing_tokens_map_to_none() {
        for token in ["", "  ", "NA", "n/a", "NaN", "null", "None", "-"] {
            assert_eq!(parse_f64(token), None, "token {token:?}");
        }
    }

    #[test]
    fn non_finite_text_maps_to_none() {
        assert_eq!(parse_f64("inf"), None);
        assert_eq!(parse_f64("-infinity"), None);
        assert_eq!(parse_f64("not a number"), None);
    }

    #[test]
    fn integer_coercion_accepts_float_text() {
        assert_eq!(parse_i64("1001"), Some(1001));
        assert_eq!(parse_i64("1001.0"), Some(1001));
        assert_eq!(parse_i64("abc"), None);
    }

    #[test]
    fn header_whitespace_is_collapsed() {
        assert_eq!(normalize_header("  Orbital   Period  "), "Orbital Period");
        assert_eq!(normalize_header("\u{feff}kepid"), "kepid");
    }
}
