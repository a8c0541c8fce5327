//! Offline dataset construction.
//!
//! Builds the compressed archive consumed by the (external) training
//! process: parallel arrays of feature vectors, labels and per-row
//! metadata, written as a zstd-compressed Parquet file with one
//! `f###` column per feature dimension.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result, bail};
use polars::prelude::{DataFrame, Column, ParquetCompression, ParquetWriter};
use tracing::{debug, info, warn};

use exoscan_curve::{DetrendOptions, FoldOptions, detrend, fold};
use exoscan_ingest::{RawTable, parse_f64};
use exoscan_map::normalize;
use exoscan_model::{LightCurve, catalog_features};

/// Dataset build tunables.
#[derive(Debug, Clone, Copy, Default)]
pub struct DatasetOptions {
    /// Build folded time-series vectors instead of catalog features.
    /// Requires inline `time`/`flux` array columns in the table.
    pub curves: bool,
    pub detrend: DetrendOptions,
    pub fold: FoldOptions,
}

/// Build outcome: row counts and the feature dimension written.
#[derive(Debug, Clone, Copy)]
pub struct DatasetSummary {
    pub rows: usize,
    /// Rows skipped for an unknown label or an unusable series.
    pub skipped: usize,
    pub feature_len: usize,
}

/// Map a disposition cell to a binary label. Confirmed planets and
/// still-open candidates are positives, established false positives
/// are negatives; anything else is unusable.
fn map_label(raw: &str) -> Option<i64> {
    match raw.trim().to_uppercase().as_str() {
        "CONFIRMED" | "CANDIDATE" | "1" => Some(1),
        "FALSE POSITIVE" | "0" => Some(0),
        _ => None,
    }
}

/// Parse an inline array cell of the form `[v, v, ...]`, dropping
/// unparseable entries.
fn parse_series(raw: &str) -> Vec<f64> {
    raw.trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .filter_map(parse_f64)
        .collect()
}

/// Build a labeled dataset from a raw table and write it to `path`.
pub fn build_dataset(
    table: &RawTable,
    path: &Path,
    options: &DatasetOptions,
) -> Result<DatasetSummary> {
    let label_col = table
        .headers
        .iter()
        .position(|header| {
            let lowered = header.to_lowercase();
            lowered.contains("disposit") || lowered == "label"
        })
        .context("no disposition or label column in table")?;
    let candidates = normalize(table)?;

    let series_cols = if options.curves {
        let find = |name: &str| {
            table
                .headers
                .iter()
                .position(|header| header.eq_ignore_ascii_case(name))
        };
        let time = find("time").context("curve mode requires a `time` array column")?;
        let flux = find("flux").context("curve mode requires a `flux` array column")?;
        Some((time, flux))
    } else {
        None
    };

    let mut ids: Vec<String> = Vec::new();
    let mut periods: Vec<Option<f64>> = Vec::new();
    let mut labels: Vec<i64> = Vec::new();
    let mut vectors: Vec<Vec<f64>> = Vec::new();
    let mut skipped = 0usize;

    for (row, candidate) in candidates.iter().enumerate() {
        let Some(label) = map_label(table.cell(row, label_col)) else {
            debug!(id = %candidate.identifier, "skipped row with unknown label");
            skipped += 1;
            continue;
        };
        let vector = match series_cols {
            None => catalog_features(candidate).to_vec(),
            Some((time_col, flux_col)) => {
                let (Some(period), Some(epoch)) = (candidate.period, candidate.epoch) else {
                    debug!(id = %candidate.identifier, "skipped row without ephemeris");
                    skipped += 1;
                    continue;
                };
                let time = parse_series(table.cell(row, time_col));
                let flux = parse_series(table.cell(row, flux_col));
                let residual = detrend(&flux, &options.detrend);
                let curve = match LightCurve::new(
                    candidate.identifier.clone(),
                    time,
                    residual,
                    period,
                    epoch,
                ) {
                    Ok(curve) => curve,
                    Err(error) => {
                        warn!(id = %candidate.identifier, %error, "skipped unusable series");
                        skipped += 1;
                        continue;
                    }
                };
                match fold(&curve, &options.fold) {
                    Ok(folded) => folded,
                    Err(error) => {
                        warn!(id = %candidate.identifier, %error, "skipped unfoldable series");
                        skipped += 1;
                        continue;
                    }
                }
            }
        };
        ids.push(candidate.identifier.clone());
        periods.push(candidate.period);
        labels.push(label);
        vectors.push(vector);
    }

    if vectors.is_empty() {
        bail!("no usable labeled rows in table");
    }
    let feature_len = vectors[0].len();

    let mut columns: Vec<Column> = vec![
        Column::new("id".into(), &ids),
        Column::new("period".into(), &periods),
        Column::new("label".into(), &labels),
    ];
    for feature in 0..feature_len {
        let values: Vec<f64> = vectors.iter().map(|vector| vector[feature]).collect();
        columns.push(Column::new(format!("f{feature:03}").into(), values));
    }
    let mut frame = DataFrame::new(columns).context("assemble dataset frame")?;

    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    ParquetWriter::new(file)
        .with_compression(ParquetCompression::Zstd(None))
        .finish(&mut frame)
        .with_context(|| format!("write {}", path.display()))?;

    info!(
        rows = ids.len(),
        skipped,
        feature_len,
        path = %path.display(),
        "dataset written"
    );
    Ok(DatasetSummary {
        rows: ids.len(),
        skipped,
        feature_len,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_mapping_matches_archive_dispositions() {
        assert_eq!(map_label("CONFIRMED"), Some(1));
        assert_eq!(map_label("candidate"), Some(1));
        assert_eq!(map_label("FALSE POSITIVE"), Some(0));
        assert_eq!(map_label("NOT DISPOSITIONED"), None);
        assert_eq!(map_label(""), None);
    }

    #[test]
    fn inline_series_cells_parse_with_garbage_dropped() {
        assert_eq!(parse_series("[1.0, 2.5, 3.0]"), vec![1.0, 2.5, 3.0]);
        assert_eq!(parse_series("[1.0, oops, 3.0]"), vec![1.0, 3.0]);
        assert_eq!(parse_series(""), Vec::<f64>::new());
    }
}
