//! Multi-strategy CSV ingestion.
//!
//! Input tables arrive from external archives and user uploads with
//! inconsistent delimiters, quoting and encodings. Parsing runs an
//! ordered chain of pure `bytes -> Result<RawTable, _>` strategies and
//! keeps the first success; there is no partial merging across
//! strategies. Each attempt is recorded in the [`IngestReport`] so the
//! short-circuit behavior is observable.

use csv::ReaderBuilder;
use tracing::{debug, info, warn};

use exoscan_model::{IngestError, StrategyError};

use crate::coerce::{normalize_cell, normalize_header};
use crate::table::RawTable;

/// Delimiters considered by the sniffing strategy, in preference order.
const SNIFF_DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Tunables for the recovery strategy.
#[derive(Debug, Clone, Copy)]
pub struct IngestOptions {
    /// Maximum body lines kept by the manual recovery parse.
    pub recovery_line_cap: usize,
    /// Minimum comma-separated fields for a line to survive recovery.
    pub recovery_min_fields: usize,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            recovery_line_cap: 100,
            recovery_min_fields: 3,
        }
    }
}

impl IngestOptions {
    #[must_use]
    pub fn with_recovery_line_cap(mut self, cap: usize) -> Self {
        self.recovery_line_cap = cap;
        self
    }
}

/// Which strategies ran and how each one failed.
#[derive(Debug, Clone)]
pub struct IngestReport {
    /// Name of the strategy that produced the table.
    pub strategy: &'static str,
    /// Failed attempts before the winning strategy, in order.
    pub attempts: Vec<(&'static str, StrategyError)>,
}

impl IngestReport {
    /// Names of the strategies that were tried and failed.
    #[must_use]
    pub fn failed_strategies(&self) -> Vec<&'static str> {
        self.attempts.iter().map(|(name, _)| *name).collect()
    }
}

/// A successfully parsed table together with its ingestion telemetry.
#[derive(Debug, Clone)]
pub struct Ingested {
    pub table: RawTable,
    pub report: IngestReport,
}

/// Parse raw bytes with the default options.
pub fn ingest(bytes: &[u8]) -> Result<Ingested, IngestError> {
    ingest_with_options(bytes, &IngestOptions::default())
}

/// Parse raw bytes, trying each strategy in order and returning the
/// first success. Fails only when every strategy fails.
pub fn ingest_with_options(
    bytes: &[u8],
    options: &IngestOptions,
) -> Result<Ingested, IngestError> {
    if bytes.iter().all(|byte| byte.is_ascii_whitespace()) {
        return Err(IngestError::EmptyInput);
    }
    let bytes = strip_comment_lines(bytes);

    let recovery = |input: &[u8]| manual_recovery_parse(input, options);
    let strategies: [(&'static str, &dyn Fn(&[u8]) -> Result<RawTable, StrategyError>); 4] = [
        ("strict", &strict_parse),
        ("lenient", &lenient_parse),
        ("sniff", &sniff_parse),
        ("manual-recovery", &recovery),
    ];

    let mut attempts: Vec<(&'static str, StrategyError)> = Vec::new();
    for (name, strategy) in strategies {
        match strategy(&bytes).and_then(|mut table| {
            table.drop_degenerate();
            if table.is_empty() {
                Err(StrategyError::NoHeader)
            } else {
                Ok(table)
            }
        }) {
            Ok(table) => {
                info!(
                    strategy = name,
                    rows = table.height(),
                    columns = table.width(),
                    failed_attempts = attempts.len(),
                    "parsed table"
                );
                return Ok(Ingested {
                    table,
                    report: IngestReport {
                        strategy: name,
                        attempts,
                    },
                });
            }
            Err(error) => {
                debug!(strategy = name, %error, "parse strategy failed");
                attempts.push((name, error));
            }
        }
    }
    warn!(
        attempts = attempts.len(),
        "all parsing strategies exhausted"
    );
    Err(IngestError::Exhausted { attempts })
}

/// Drop lines whose first non-blank byte is `#` (archive exports embed
/// comment preambles). Quoted newlines are rare in these catalogs and
/// are not special-cased here.
fn strip_comment_lines(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    for line in bytes.split(|byte| *byte == b'\n') {
        let first = line
            .iter()
            .find(|byte| !matches!(**byte, b' ' | b'\t' | b'\r'));
        if first == Some(&b'#') {
            continue;
        }
        out.extend_from_slice(line);
        out.push(b'\n');
    }
    out
}

/// Unbalanced quotes make a quote-interpreting parser swallow the rest
/// of the file into one field. The underlying reader tolerates that, so
/// the quote-aware strategies reject it explicitly and let the
/// quote-free strategies handle the file instead.
fn check_quote_balance(bytes: &[u8]) -> Result<(), StrategyError> {
    let quotes = bytes.iter().filter(|byte| **byte == b'"').count();
    if quotes % 2 == 1 {
        return Err(StrategyError::Parse(
            "unterminated quoted field".to_string(),
        ));
    }
    Ok(())
}

/// Strategy 1: comma-delimited, standard quoting, rigid field counts.
/// Any malformed record aborts the parse.
fn strict_parse(bytes: &[u8]) -> Result<RawTable, StrategyError> {
    check_quote_balance(bytes)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(false)
        .from_reader(bytes);
    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|error| StrategyError::Parse(error.to_string()))?;
        records.push(record);
    }
    table_from_records(records, RowPolicy::Reject)
}

/// Strategy 2: comma-delimited with escape handling; malformed rows
/// are skipped rather than aborting the parse.
fn lenient_parse(bytes: &[u8]) -> Result<RawTable, StrategyError> {
    check_quote_balance(bytes)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .escape(Some(b'\\'))
        .from_reader(bytes);
    let mut records = Vec::new();
    for record in reader.records() {
        match record {
            Ok(record) => records.push(record),
            Err(error) => debug!(%error, "lenient parse skipped record"),
        }
    }
    table_from_records(records, RowPolicy::Skip)
}

/// Strategy 3: auto-detected delimiter with quote interpretation
/// disabled; malformed rows are skipped.
fn sniff_parse(bytes: &[u8]) -> Result<RawTable, StrategyError> {
    let delimiter = detect_delimiter(bytes);
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .delimiter(delimiter)
        .from_reader(bytes);
    let mut records = Vec::new();
    for record in reader.records() {
        match record {
            Ok(record) => records.push(record),
            Err(error) => debug!(%error, "sniff parse skipped record"),
        }
    }
    table_from_records(records, RowPolicy::Skip)
}

/// Strategy 4: permissive byte decode, keep only lines with at least
/// `recovery_min_fields` comma-separated fields, cap the body, then
/// re-run the strict parse over the reconstructed text in memory.
fn manual_recovery_parse(
    bytes: &[u8],
    options: &IngestOptions,
) -> Result<RawTable, StrategyError> {
    let text = String::from_utf8_lossy(bytes);
    let mut valid_lines = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && line.split(',').count() >= options.recovery_min_fields);
    let Some(header) = valid_lines.next() else {
        return Err(StrategyError::NoHeader);
    };
    let mut rebuilt = String::from(header);
    rebuilt.push('\n');
    for line in valid_lines.take(options.recovery_line_cap) {
        rebuilt.push_str(line);
        rebuilt.push('\n');
    }
    strict_parse(rebuilt.as_bytes())
}

/// Pick the candidate delimiter occurring most often in the first
/// line; comma wins ties and the no-delimiter case.
fn detect_delimiter(bytes: &[u8]) -> u8 {
    let first_line = bytes
        .split(|byte| *byte == b'\n')
        .find(|line| !line.iter().all(|byte| byte.is_ascii_whitespace()))
        .unwrap_or(&[]);
    let mut best = b',';
    let mut best_count = 0usize;
    for candidate in SNIFF_DELIMITERS {
        let count = first_line.iter().filter(|byte| **byte == candidate).count();
        if count > best_count {
            best = candidate;
            best_count = count;
        }
    }
    best
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum RowPolicy {
    /// A row wider than the header fails the whole strategy.
    Reject,
    /// A row wider than the header is dropped; the parse continues.
    Skip,
}

fn table_from_records(
    records: Vec<csv::StringRecord>,
    policy: RowPolicy,
) -> Result<RawTable, StrategyError> {
    let mut iter = records.into_iter();
    let Some(header_record) = iter.next() else {
        return Err(StrategyError::NoHeader);
    };
    let headers: Vec<String> = header_record.iter().map(normalize_header).collect();
    let width = headers.len();
    let mut rows = Vec::new();
    for record in iter {
        if record.len() > width {
            match policy {
                RowPolicy::Reject => {
                    return Err(StrategyError::Parse(format!(
                        "row has {} fields, header has {width}",
                        record.len()
                    )));
                }
                RowPolicy::Skip => continue,
            }
        }
        // Short rows are padded so every row matches the header width.
        let mut row: Vec<String> = record.iter().map(normalize_cell).collect();
        row.resize(width, String::new());
        rows.push(row);
    }
    if rows.is_empty() && policy == RowPolicy::Skip {
        return Err(StrategyError::NoRows);
    }
    Ok(RawTable { headers, rows })
}
