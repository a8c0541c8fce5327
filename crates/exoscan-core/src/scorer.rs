//! Scorer boundary.
//!
//! The classifier proper is an external collaborator: anything that
//! maps a fixed-length feature vector to a probability can sit behind
//! [`Scorer`]. The pipeline never mutates a vector after handing it
//! over and the scorer must behave as a pure function of its input.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;

use exoscan_model::ScoreError;

/// Vector-in, probability-out classification capability.
pub trait Scorer: Send + Sync {
    /// Expected feature vector length.
    fn input_len(&self) -> usize;

    /// Score one vector; the result is a probability in [0, 1].
    fn score(&self, features: &[f64]) -> Result<f64, ScoreError>;

    /// Score a batch, stopping at the first hard failure.
    fn score_batch(&self, batch: &[Vec<f64>]) -> Result<Vec<f64>, ScoreError> {
        batch.iter().map(|features| self.score(features)).collect()
    }
}

/// Standardized logistic model loaded from a JSON weights file.
///
/// Scores `sigmoid(bias + sum(w_i * (x_i - mean_i) / scale_i))`. This
/// is the minimal attachable scorer; a trained network can replace it
/// behind the same trait.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearScorer {
    weights: Vec<f64>,
    bias: f64,
    #[serde(default)]
    means: Vec<f64>,
    #[serde(default)]
    scales: Vec<f64>,
}

impl LinearScorer {
    /// Build a scorer with no input standardization.
    #[must_use]
    pub fn new(weights: Vec<f64>, bias: f64) -> Self {
        Self {
            weights,
            bias,
            means: Vec::new(),
            scales: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_standardization(mut self, means: Vec<f64>, scales: Vec<f64>) -> Self {
        self.means = means;
        self.scales = scales;
        self
    }

    /// Load weights from a JSON file, validating dimensions.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read scorer weights: {}", path.display()))?;
        let scorer: Self = serde_json::from_str(&raw)
            .with_context(|| format!("parse scorer weights: {}", path.display()))?;
        if scorer.weights.is_empty() {
            anyhow::bail!("scorer weights file {} has no weights", path.display());
        }
        for (name, values) in [("means", &scorer.means), ("scales", &scorer.scales)] {
            if !values.is_empty() && values.len() != scorer.weights.len() {
                anyhow::bail!(
                    "scorer {name} length {} does not match {} weights",
                    values.len(),
                    scorer.weights.len()
                );
            }
        }
        info!(
            path = %path.display(),
            inputs = scorer.weights.len(),
            "loaded linear scorer"
        );
        Ok(scorer)
    }
}

impl Scorer for LinearScorer {
    fn input_len(&self) -> usize {
        self.weights.len()
    }

    fn score(&self, features: &[f64]) -> Result<f64, ScoreError> {
        if features.len() != self.weights.len() {
            return Err(ScoreError::Dimension {
                expected: self.weights.len(),
                actual: features.len(),
            });
        }
        if let Some(index) = features.iter().position(|value| !value.is_finite()) {
            return Err(ScoreError::NonFinite { index });
        }
        let mut logit = self.bias;
        for (index, (weight, value)) in self.weights.iter().zip(features).enumerate() {
            let mean = self.means.get(index).copied().unwrap_or(0.0);
            let scale = self
                .scales
                .get(index)
                .copied()
                .filter(|scale| *scale != 0.0)
                .unwrap_or(1.0);
            logit += weight * (value - mean) / scale;
        }
        let probability = 1.0 / (1.0 + (-logit).exp());
        Ok(probability.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probability_stays_in_unit_interval() {
        let scorer = LinearScorer::new(vec![10.0, -10.0], 0.0);
        let high = scorer.score(&[100.0, -100.0]).expect("scores");
        let low = scorer.score(&[-100.0, 100.0]).expect("scores");
        assert!((0.0..=1.0).contains(&high));
        assert!((0.0..=1.0).contains(&low));
        assert!(high > 0.99);
        assert!(low < 0.01);
    }

    #[test]
    fn wrong_dimension_is_rejected() {
        let scorer = LinearScorer::new(vec![1.0; 13], 0.0);
        let result = scorer.score(&[1.0, 2.0]);
        assert_eq!(
            result,
            Err(ScoreError::Dimension {
                expected: 13,
                actual: 2
            })
        );
    }

    #[test]
    fn non_finite_features_are_rejected() {
        let scorer = LinearScorer::new(vec![1.0, 1.0], 0.0);
        let result = scorer.score(&[1.0, f64::NAN]);
        assert_eq!(result, Err(ScoreError::NonFinite { index: 1 }));
    }

    #[test]
    fn standardization_shifts_the_logit() {
        let plain = LinearScorer::new(vec![1.0], 0.0);
        let standardized =
            LinearScorer::new(vec![1.0], 0.0).with_standardization(vec![5.0], vec![2.0]);
        let a = plain.score(&[5.0]).expect("scores");
        let b = standardized.score(&[5.0]).expect("scores");
        assert!(a > 0.99);
        assert!((b - 0.5).abs() < 1e-12);
    }
}
