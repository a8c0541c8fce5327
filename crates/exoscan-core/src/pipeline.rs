//! Batch orchestration: raw bytes to prediction records.
//!
//! Stages run in order — ingest, normalize, validate, extract, score —
//! and rows are processed independently: one row's failure becomes a
//! per-row error record and never aborts the batch. The orchestrator
//! owns every intermediate artifact; nothing survives the batch call.

use tracing::{debug, info, info_span, warn};

use exoscan_curve::{DetrendOptions, FoldOptions, detrend, fold};
use exoscan_ingest::{IngestOptions, ingest_with_options};
use exoscan_map::{ValidateOptions, normalize, validate};
use exoscan_model::{
    Candidate, LightCurve, PredictError, PredictionRecord, RowError, catalog_features,
};

use crate::broadcast::ListenerRegistry;
use crate::cancel::CancelToken;
use crate::scorer::Scorer;

/// Tunables for every pipeline stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineOptions {
    pub ingest: IngestOptions,
    pub validate: ValidateOptions,
    pub detrend: DetrendOptions,
    pub fold: FoldOptions,
}

/// Result of a whole-batch run, with the telemetry callers need to
/// reconcile input and output row counts.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub records: Vec<PredictionRecord>,
    /// Parsing strategy that produced the table.
    pub strategy: &'static str,
    /// Strategies that failed before the winning one.
    pub failed_strategies: Vec<&'static str>,
    /// Rows excluded for invalid period/epoch.
    pub dropped_invalid: usize,
    /// True when the row cap truncated the batch.
    pub truncated: bool,
}

/// Drives per-row prediction over a table or a set of light curves.
pub struct Pipeline<'a> {
    scorer: Option<&'a dyn Scorer>,
    listeners: Option<&'a ListenerRegistry<PredictionRecord>>,
    options: PipelineOptions,
}

impl<'a> Pipeline<'a> {
    #[must_use]
    pub fn new(options: PipelineOptions) -> Self {
        Self {
            scorer: None,
            listeners: None,
            options,
        }
    }

    #[must_use]
    pub fn with_scorer(mut self, scorer: &'a dyn Scorer) -> Self {
        self.scorer = Some(scorer);
        self
    }

    /// Stream each produced record to the registry's listeners as the
    /// batch progresses.
    #[must_use]
    pub fn with_listeners(mut self, listeners: &'a ListenerRegistry<PredictionRecord>) -> Self {
        self.listeners = Some(listeners);
        self
    }

    /// Ingest raw bytes and predict every surviving row.
    ///
    /// Fails only when no parsing strategy succeeds or the required
    /// columns cannot be located; row-level failures are embedded in
    /// the records.
    pub fn run_batch(
        &self,
        bytes: &[u8],
        cancel: &CancelToken,
    ) -> Result<BatchOutcome, PredictError> {
        let span = info_span!("run_batch", bytes = bytes.len());
        let _guard = span.enter();

        let ingested = ingest_with_options(bytes, &self.options.ingest)?;
        let candidates = normalize(&ingested.table)?;
        let filtered = validate(candidates, &self.options.validate);
        info!(
            strategy = ingested.report.strategy,
            rows = filtered.candidates.len(),
            dropped = filtered.dropped_invalid,
            truncated = filtered.truncated,
            "batch prepared"
        );
        let records = self.predict_catalog(&filtered.candidates, cancel);
        Ok(BatchOutcome {
            records,
            strategy: ingested.report.strategy,
            failed_strategies: ingested.report.failed_strategies(),
            dropped_invalid: filtered.dropped_invalid,
            truncated: filtered.truncated,
        })
    }

    /// Score validated candidates, one record per row, order preserved.
    #[must_use]
    pub fn predict_catalog(
        &self,
        candidates: &[Candidate],
        cancel: &CancelToken,
    ) -> Vec<PredictionRecord> {
        let mut records = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if cancel.is_cancelled() {
                warn!(produced = records.len(), "batch cancelled mid-flight");
                break;
            }
            let features = catalog_features(candidate);
            let record = self.score_row(&candidate.identifier, &features);
            self.emit(&record);
            records.push(record);
        }
        records
    }

    /// Detrend, fold and score raw light curves, one record per curve.
    #[must_use]
    pub fn predict_curves(
        &self,
        curves: &[LightCurve],
        cancel: &CancelToken,
    ) -> Vec<PredictionRecord> {
        let mut records = Vec::with_capacity(curves.len());
        for curve in curves {
            if cancel.is_cancelled() {
                warn!(produced = records.len(), "batch cancelled mid-flight");
                break;
            }
            let record = self.predict_one_curve(curve);
            self.emit(&record);
            records.push(record);
        }
        records
    }

    fn emit(&self, record: &PredictionRecord) {
        if let Some(listeners) = self.listeners {
            let delivered = listeners.broadcast(record);
            debug!(id = %record.id, delivered, "record broadcast");
        }
    }

    fn predict_one_curve(&self, curve: &LightCurve) -> PredictionRecord {
        let residual = detrend(&curve.flux, &self.options.detrend);
        let detrended = LightCurve {
            flux: residual,
            ..curve.clone()
        };
        match fold(&detrended, &self.options.fold) {
            Ok(folded) => self.score_row(&curve.identifier, &folded),
            Err(error) => {
                debug!(id = %curve.identifier, %error, "fold failed");
                PredictionRecord::failed(&curve.identifier, &error.into())
            }
        }
    }

    fn score_row(&self, identifier: &str, features: &[f64]) -> PredictionRecord {
        let Some(scorer) = self.scorer else {
            return PredictionRecord::failed(
                identifier,
                &RowError::new("scorer not initialized"),
            );
        };
        match scorer.score(features) {
            Ok(probability) => PredictionRecord::ok(identifier, probability),
            Err(error) => {
                debug!(id = %identifier, %error, "scorer rejected row");
                PredictionRecord::failed(identifier, &RowError::new(error.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::LinearScorer;

    fn candidate(id: &str) -> Candidate {
        Candidate {
            identifier: id.to_string(),
            period: Some(3.5),
            epoch: Some(10.0),
            ..Candidate::default()
        }
    }

    #[test]
    fn missing_scorer_reports_per_row() {
        let pipeline = Pipeline::new(PipelineOptions::default());
        let records =
            pipeline.predict_catalog(&[candidate("a"), candidate("b")], &CancelToken::new());
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|record| {
            record
                .error
                .as_deref()
                .is_some_and(|error| error.contains("scorer not initialized"))
        }));
    }

    #[test]
    fn listeners_receive_each_record_in_order() {
        let scorer = LinearScorer::new(vec![0.0; 13], 0.0);
        let registry = ListenerRegistry::new();
        let (_id, receiver) = registry.subscribe();
        let pipeline = Pipeline::new(PipelineOptions::default())
            .with_scorer(&scorer)
            .with_listeners(&registry);
        let records =
            pipeline.predict_catalog(&[candidate("a"), candidate("b")], &CancelToken::new());
        let streamed: Vec<PredictionRecord> = receiver.try_iter().collect();
        assert_eq!(streamed, records);
    }

    #[test]
    fn cancellation_stops_further_rows() {
        let scorer = LinearScorer::new(vec![0.0; 13], 0.0);
        let pipeline = Pipeline::new(PipelineOptions::default()).with_scorer(&scorer);
        let cancel = CancelToken::new();
        cancel.cancel();
        let records = pipeline.predict_catalog(&[candidate("a"), candidate("b")], &cancel);
        assert!(records.is_empty());
    }
}
