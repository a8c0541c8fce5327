//! Dataset builds against temporary Parquet files.

use std::fs::File;

use polars::prelude::{ParquetReader, SerReader};

use exoscan_core::{DatasetOptions, build_dataset};
use exoscan_ingest::RawTable;

fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
    RawTable {
        headers: headers.iter().map(|h| (*h).to_string()).collect(),
        rows: rows
            .iter()
            .map(|row| row.iter().map(|c| (*c).to_string()).collect())
            .collect(),
    }
}

#[test]
fn catalog_dataset_writes_parallel_columns() {
    let table = table(
        &["kepid", "koi_period", "koi_time0bk", "koi_disposition"],
        &[
            &["1001", "3.5", "134.5", "CONFIRMED"],
            &["1002", "10.2", "140.0", "FALSE POSITIVE"],
            &["1003", "5.0", "141.0", "AMBIGUOUS"],
        ],
    );
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("catalog.parquet");

    let summary =
        build_dataset(&table, &path, &DatasetOptions::default()).expect("dataset builds");
    assert_eq!(summary.rows, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.feature_len, 13);

    let frame = ParquetReader::new(File::open(&path).expect("open parquet"))
        .finish()
        .expect("read parquet");
    assert_eq!(frame.shape(), (2, 3 + 13));
    let names: Vec<&str> = frame
        .get_column_names()
        .iter()
        .map(|name| name.as_str())
        .collect();
    assert_eq!(&names[..3], &["id", "period", "label"]);
    assert_eq!(names[3], "f000");
    assert_eq!(names[15], "f012");
}

#[test]
fn curve_dataset_folds_inline_series() {
    let mut time = Vec::new();
    let mut flux = Vec::new();
    for i in 0..800 {
        let t = f64::from(i) * 0.01;
        time.push(format!("{t:.4}"));
        flux.push("1.0".to_string());
    }
    let time_cell = format!("[{}]", time.join(","));
    let flux_cell = format!("[{}]", flux.join(","));

    let table = table(
        &["kepid", "koi_period", "t0", "koi_disposition", "time", "flux"],
        &[&["2001", "1.0", "2.0", "CANDIDATE", &time_cell, &flux_cell]],
    );
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("curves.parquet");

    let options = DatasetOptions {
        curves: true,
        ..DatasetOptions::default()
    };
    let summary = build_dataset(&table, &path, &options).expect("dataset builds");
    assert_eq!(summary.rows, 1);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.feature_len, 201);
}

#[test]
fn missing_label_column_is_an_error() {
    let table = table(
        &["kepid", "koi_period", "koi_time0bk"],
        &[&["1001", "3.5", "134.5"]],
    );
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nolabel.parquet");
    assert!(build_dataset(&table, &path, &DatasetOptions::default()).is_err());
}
