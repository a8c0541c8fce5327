use std::time::Duration;

use anyhow::Result;
use comfy_table::Table;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use exoscan_core::{DatasetOptions, PipelineOptions};
use exoscan_map::ValidateOptions;
use exoscan_model::{CanonicalField, NUMERIC_FIELDS, field_default};

use exoscan_cli::predict::{dataset_file, predict_file};

use crate::cli::{DatasetArgs, PredictArgs};
use crate::summary::apply_table_style;
use crate::types::PredictResult;

pub fn run_predict(args: &PredictArgs) -> Result<PredictResult> {
    let options = PipelineOptions {
        validate: ValidateOptions {
            max_rows: args.max_rows,
        },
        ..PipelineOptions::default()
    };
    let spinner = progress_spinner("scoring candidates");
    let result = predict_file(
        &args.input,
        args.model.as_deref(),
        args.output.as_deref(),
        &options,
    );
    spinner.finish_and_clear();
    let outcome = result?;
    Ok(PredictResult {
        input: args.input.clone(),
        output: outcome.output,
        records: outcome.batch.records,
        strategy: outcome.batch.strategy,
        failed_strategies: outcome.batch.failed_strategies,
        dropped_invalid: outcome.batch.dropped_invalid,
        truncated: outcome.batch.truncated,
    })
}

pub fn run_dataset(args: &DatasetArgs) -> Result<()> {
    let options = DatasetOptions {
        curves: args.curves,
        ..DatasetOptions::default()
    };
    let spinner = progress_spinner("building dataset");
    let result = dataset_file(&args.input, &args.out, &options);
    spinner.finish_and_clear();
    let summary = result?;
    info!(
        rows = summary.rows,
        skipped = summary.skipped,
        "dataset build complete"
    );
    println!("Dataset: {}", args.out.display());
    println!(
        "Rows: {} ({} skipped), features per row: {}",
        summary.rows, summary.skipped, summary.feature_len
    );
    Ok(())
}

pub fn run_fields() {
    let mut table = Table::new();
    table.set_header(vec!["Field", "Required", "Default"]);
    apply_table_style(&mut table);
    table.add_row(vec![
        CanonicalField::Identifier.name().to_string(),
        "no".to_string(),
        "synthesized".to_string(),
    ]);
    for field in NUMERIC_FIELDS {
        let default = match field_default(field) {
            Some(value) => value.to_string(),
            None => "-".to_string(),
        };
        table.add_row(vec![
            field.name().to_string(),
            if field.is_required() { "yes" } else { "no" }.to_string(),
            default,
        ]);
    }
    println!("{table}");
}

fn progress_spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner().with_message(message);
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
