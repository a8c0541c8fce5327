//! Column normalization: heterogeneous headers onto the canonical
//! candidate schema.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use exoscan_ingest::{RawTable, parse_f64};
use exoscan_model::{Candidate, CanonicalField, NUMERIC_FIELDS, SchemaError, field_default};

use crate::rules::match_field;

/// Resolved assignment of table columns to canonical fields.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    /// Column index providing the identifier, when one exists.
    pub identifier: Option<usize>,
    /// Column index per numeric field. Fields absent here take their
    /// schema default.
    pub fields: BTreeMap<CanonicalField, usize>,
}

impl ColumnMap {
    #[must_use]
    pub fn has(&self, field: CanonicalField) -> bool {
        match field {
            CanonicalField::Identifier => self.identifier.is_some(),
            _ => self.fields.contains_key(&field),
        }
    }
}

/// Assign source columns to canonical fields.
///
/// Headers are matched against the ordered rule table; the first
/// column matching a field claims it and later matches are dropped.
/// When period or epoch remain unclaimed, positional inference treats
/// column 0 as identifier, column 1 as period and column 2 as epoch.
#[must_use]
pub fn map_columns(table: &RawTable) -> ColumnMap {
    let mut map = ColumnMap::default();
    for (index, header) in table.headers.iter().enumerate() {
        let Some(field) = match_field(header) else {
            debug!(column = %header, "column matches no rule, dropped");
            continue;
        };
        match field {
            CanonicalField::Identifier => {
                if map.identifier.is_none() {
                    map.identifier = Some(index);
                } else {
                    debug!(column = %header, "identifier already claimed, dropped");
                }
            }
            _ => {
                if let std::collections::btree_map::Entry::Vacant(entry) = map.fields.entry(field) {
                    entry.insert(index);
                } else {
                    debug!(column = %header, field = field.name(), "field already claimed, dropped");
                }
            }
        }
    }

    if !map.has(CanonicalField::Period) || !map.has(CanonicalField::Epoch) {
        warn!("required columns not matched by name, falling back to positional inference");
        let positional = [
            (CanonicalField::Identifier, 0usize),
            (CanonicalField::Period, 1usize),
            (CanonicalField::Epoch, 2usize),
        ];
        for (field, index) in positional {
            if map.has(field) || index >= table.width() {
                continue;
            }
            debug!(field = field.name(), column = index, "inferred positionally");
            if field == CanonicalField::Identifier {
                map.identifier = Some(index);
            } else {
                map.fields.insert(field, index);
            }
        }
    }
    map
}

/// Normalize a raw table into canonical candidates.
///
/// Fails with [`SchemaError`] only when period or epoch cannot be
/// located by any fallback; every other gap is filled with defaults or
/// left explicitly missing. Re-running on an already-canonical table
/// is a no-op.
pub fn normalize(table: &RawTable) -> Result<Vec<Candidate>, SchemaError> {
    let map = map_columns(table);
    let mut missing = Vec::new();
    for field in [CanonicalField::Period, CanonicalField::Epoch] {
        if !map.has(field) {
            missing.push(field.name());
        }
    }
    if !missing.is_empty() {
        return Err(SchemaError {
            missing,
            available: table.headers.clone(),
        });
    }

    let mut candidates = Vec::with_capacity(table.height());
    for row in 0..table.height() {
        let identifier = map
            .identifier
            .map(|col| table.cell(row, col).trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| format!("candidate_{row}"));
        let mut candidate = Candidate {
            identifier,
            ..Candidate::default()
        };
        for field in NUMERIC_FIELDS {
            let value = match map.fields.get(&field) {
                Some(col) => parse_f64(table.cell(row, *col)),
                // Whole column absent: documented default applies.
                None => field_default(field),
            };
            candidate.set(field, value);
        }
        candidates.push(candidate);
    }
    debug!(rows = candidates.len(), "normalized table");
    Ok(candidates)
}
