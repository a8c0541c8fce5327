//! Domain validation and volume capping for normalized candidates.

use tracing::{debug, warn};

use exoscan_model::Candidate;

/// Row filter tunables.
#[derive(Debug, Clone, Copy)]
pub struct ValidateOptions {
    /// Maximum rows kept per batch, preserving input order.
    pub max_rows: usize,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self { max_rows: 1000 }
    }
}

impl ValidateOptions {
    #[must_use]
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }
}

/// Validator output with the counts callers need to reconcile input
/// and output row totals.
#[derive(Debug, Clone, Default)]
pub struct Filtered {
    pub candidates: Vec<Candidate>,
    /// Rows dropped for a missing or non-positive period/epoch.
    pub dropped_invalid: usize,
    /// True when the row cap truncated the batch.
    pub truncated: bool,
}

/// Drop rows that would corrupt phase folding (period or epoch missing
/// or non-positive) and cap the survivors. Never fails: an empty
/// result simply propagates to "no predictions".
#[must_use]
pub fn validate(candidates: Vec<Candidate>, options: &ValidateOptions) -> Filtered {
    let input = candidates.len();
    let mut kept: Vec<Candidate> = candidates
        .into_iter()
        .filter(|candidate| {
            let valid = candidate.has_valid_ephemeris();
            if !valid {
                debug!(id = %candidate.identifier, "dropped row with invalid ephemeris");
            }
            valid
        })
        .collect();
    let dropped_invalid = input - kept.len();
    if dropped_invalid > 0 {
        warn!(dropped = dropped_invalid, "rows with invalid period/epoch excluded");
    }

    let truncated = kept.len() > options.max_rows;
    if truncated {
        warn!(
            rows = kept.len(),
            cap = options.max_rows,
            "row volume capped"
        );
        kept.truncate(options.max_rows);
    }
    Filtered {
        candidates: kept,
        dropped_invalid,
        truncated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: &str, period: Option<f64>, epoch: Option<f64>) -> Candidate {
        Candidate {
            identifier: id.to_string(),
            period,
            epoch,
            ..Candidate::default()
        }
    }

    #[test]
    fn non_positive_and_missing_ephemerides_are_dropped() {
        let rows = vec![
            candidate("ok", Some(3.5), Some(10.0)),
            candidate("zero-period", Some(0.0), Some(10.0)),
            candidate("negative-epoch", Some(3.5), Some(-1.0)),
            candidate("missing-period", None, Some(10.0)),
        ];
        let filtered = validate(rows, &ValidateOptions::default());
        assert_eq!(filtered.dropped_invalid, 3);
        assert_eq!(filtered.candidates.len(), 1);
        assert_eq!(filtered.candidates[0].identifier, "ok");
        assert!(!filtered.truncated);
    }

    #[test]
    fn cap_keeps_first_rows_in_order() {
        let rows: Vec<Candidate> = (0..1500)
            .map(|idx| candidate(&format!("c{idx}"), Some(1.0), Some(1.0)))
            .collect();
        let filtered = validate(rows, &ValidateOptions::default());
        assert!(filtered.truncated);
        assert_eq!(filtered.candidates.len(), 1000);
        assert_eq!(filtered.candidates[0].identifier, "c0");
        assert_eq!(filtered.candidates[999].identifier, "c999");
    }

    #[test]
    fn empty_input_is_valid() {
        let filtered = validate(Vec::new(), &ValidateOptions::default());
        assert!(filtered.candidates.is_empty());
        assert_eq!(filtered.dropped_invalid, 0);
        assert!(!filtered.truncated);
    }
}
