//! Per-candidate prediction output.

use serde::{Deserialize, Serialize};

use crate::error::RowError;

/// One prediction result per processed candidate.
///
/// Serializes as `{"id": ..., "prob_planet": ...}` on success or
/// `{"id": ..., "error": ...}` on a per-row failure, matching the
/// batch response shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prob_planet: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PredictionRecord {
    #[must_use]
    pub fn ok(id: impl Into<String>, prob_planet: f64) -> Self {
        Self {
            id: id.into(),
            prob_planet: Some(prob_planet),
            error: None,
        }
    }

    #[must_use]
    pub fn failed(id: impl Into<String>, error: &RowError) -> Self {
        Self {
            id: id.into(),
            prob_planet: None,
            error: Some(error.to_string()),
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.prob_planet.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_record_omits_error_key() {
        let record = PredictionRecord::ok("1001", 0.87);
        let json = serde_json::to_string(&record).expect("serialize record");
        assert_eq!(json, r#"{"id":"1001","prob_planet":0.87}"#);
    }

    #[test]
    fn failed_record_omits_probability_key() {
        let record = PredictionRecord::failed("1002", &RowError::new("fold failed"));
        let json = serde_json::to_string(&record).expect("serialize record");
        assert_eq!(json, r#"{"id":"1002","error":"fold failed"}"#);
    }
}
