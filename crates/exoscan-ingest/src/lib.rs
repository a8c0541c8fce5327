pub mod coerce;
pub mod strategy;
pub mod table;

pub use coerce::{is_missing_value, normalize_cell, normalize_header, parse_f64, parse_i64};
pub use strategy::{Ingested, IngestOptions, IngestReport, ingest, ingest_with_options};
pub use table::RawTable;
