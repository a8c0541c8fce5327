//! File-level operations behind the CLI subcommands: batch prediction
//! over a catalog file and offline dataset builds.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use exoscan_core::{
    BatchOutcome, CancelToken, DatasetOptions, DatasetSummary, LinearScorer, Pipeline,
    PipelineOptions, build_dataset,
};
use exoscan_ingest::{IngestOptions, ingest_with_options};
use exoscan_model::PredictionRecord;

/// Outcome of a file prediction run, with the path the records were
/// written to when not streamed to stdout.
#[derive(Debug)]
pub struct PredictOutcome {
    pub batch: BatchOutcome,
    pub output: Option<PathBuf>,
}

/// Predict every row of a catalog file.
///
/// Records are written as JSON lines to `output`, or to stdout when no
/// path is given. Without a model file every row carries a per-row
/// error; the batch itself still succeeds.
pub fn predict_file(
    input: &Path,
    model: Option<&Path>,
    output: Option<&Path>,
    options: &PipelineOptions,
) -> Result<PredictOutcome> {
    let bytes =
        fs::read(input).with_context(|| format!("read input file: {}", input.display()))?;
    let scorer = model.map(LinearScorer::load).transpose()?;

    let mut pipeline = Pipeline::new(*options);
    if let Some(scorer) = scorer.as_ref() {
        pipeline = pipeline.with_scorer(scorer);
    }
    let batch = pipeline
        .run_batch(&bytes, &CancelToken::new())
        .with_context(|| format!("predict over {}", input.display()))?;
    info!(
        input = %input.display(),
        records = batch.records.len(),
        strategy = batch.strategy,
        "prediction complete"
    );

    write_records(&batch.records, output)?;
    Ok(PredictOutcome {
        batch,
        output: output.map(Path::to_path_buf),
    })
}

/// Write prediction records as JSON lines to a file or stdout.
pub fn write_records(records: &[PredictionRecord], output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let file =
                fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
            let mut writer = io::BufWriter::new(file);
            for record in records {
                serde_json::to_writer(&mut writer, record)?;
                writeln!(writer)?;
            }
            writer.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            for record in records {
                serde_json::to_writer(&mut writer, record)?;
                writeln!(writer)?;
            }
        }
    }
    Ok(())
}

/// Ingest a labeled catalog file and write a training dataset.
pub fn dataset_file(input: &Path, out: &Path, options: &DatasetOptions) -> Result<DatasetSummary> {
    let bytes =
        fs::read(input).with_context(|| format!("read input file: {}", input.display()))?;
    let ingested = ingest_with_options(&bytes, &IngestOptions::default())
        .with_context(|| format!("parse {}", input.display()))?;
    build_dataset(&ingested.table, out, options)
}
