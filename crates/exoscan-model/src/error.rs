//! Error taxonomy for the ingestion and prediction pipeline.
//!
//! The split mirrors the propagation policy: strategy failures are
//! recovered inside the ingestor and only surface as [`IngestError`]
//! after exhaustion; [`RowError`] never crosses the orchestrator
//! boundary; [`SchemaError`] and [`IngestError`] are terminal for a
//! whole batch.

use thiserror::Error;

/// Failure of a single parsing strategy. Recovered locally by the
/// strategy chain; only reported inside an [`IngestError`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StrategyError {
    #[error("csv parse error: {0}")]
    Parse(String),
    #[error("no data rows survived parsing")]
    NoRows,
    #[error("no header row found")]
    NoHeader,
}

/// Every parsing strategy failed. Terminal for the batch.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("no parsing strategy succeeded ({})", summarize_attempts(.attempts))]
    Exhausted {
        /// `(strategy name, failure)` in attempt order.
        attempts: Vec<(&'static str, StrategyError)>,
    },
    #[error("empty input")]
    EmptyInput,
}

fn summarize_attempts(attempts: &[(&'static str, StrategyError)]) -> String {
    attempts
        .iter()
        .map(|(name, error)| format!("{name}: {error}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Required fields absent from every row after all normalization
/// fallbacks. Terminal for the batch.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("missing required columns {missing:?}; available columns {available:?}")]
pub struct SchemaError {
    pub missing: Vec<&'static str>,
    pub available: Vec<String>,
}

/// A single row's feature or fold computation failed. Isolated by the
/// batch orchestrator; the batch continues.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct RowError {
    pub message: String,
}

impl RowError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<CurveError> for RowError {
    fn from(error: CurveError) -> Self {
        Self::new(error.to_string())
    }
}

/// Structurally invalid time-series input.
#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum CurveError {
    #[error("time and flux lengths differ ({time} vs {flux})")]
    MismatchedLengths { time: usize, flux: usize },
    #[error("empty time series")]
    EmptySeries,
    #[error("period and epoch must be positive (period={period}, epoch={epoch})")]
    InvalidEphemeris { period: f64, epoch: f64 },
}

/// Scorer boundary failures, reported per affected unit.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScoreError {
    #[error("scorer not initialized")]
    Unavailable,
    #[error("feature vector has length {actual}, scorer expects {expected}")]
    Dimension { expected: usize, actual: usize },
    #[error("non-finite feature at index {index}")]
    NonFinite { index: usize },
}

/// Umbrella error for a whole-batch run: ingestion or schema
/// resolution failed before any row was produced.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

pub type Result<T, E = PredictError> = std::result::Result<T, E>;
