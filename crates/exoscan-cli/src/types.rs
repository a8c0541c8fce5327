//! Result types surfaced by the CLI subcommands.

use std::path::PathBuf;

use exoscan_model::PredictionRecord;

/// Everything the `predict` summary needs about a finished batch.
pub struct PredictResult {
    pub input: PathBuf,
    /// Records destination; `None` means they went to stdout.
    pub output: Option<PathBuf>,
    pub records: Vec<PredictionRecord>,
    pub strategy: &'static str,
    pub failed_strategies: Vec<&'static str>,
    pub dropped_invalid: usize,
    pub truncated: bool,
}

impl PredictResult {
    pub fn scored(&self) -> usize {
        self.records.iter().filter(|record| record.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.records.len() - self.scored()
    }
}
