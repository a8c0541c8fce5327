//! Raw parsed table, prior to any schema normalization.

/// An ordered sequence of named columns of untyped cells, exactly as
/// parsing produced them. Transient: exists only between ingestion and
/// column normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    /// Row-major cells; every row has `headers.len()` cells.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    #[must_use]
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Cell accessor; out-of-range reads return an empty string so the
    /// normalizer never indexes past a short row.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .map_or("", String::as_str)
    }

    /// Drop rows whose every cell is blank, then columns whose header
    /// and every cell are blank. Column order is preserved.
    pub fn drop_degenerate(&mut self) {
        self.rows
            .retain(|row| row.iter().any(|cell| !cell.trim().is_empty()));

        let width = self.headers.len();
        let keep: Vec<bool> = (0..width)
            .map(|col| {
                !self.headers[col].trim().is_empty()
                    || self
                        .rows
                        .iter()
                        .any(|row| row.get(col).is_some_and(|cell| !cell.trim().is_empty()))
            })
            .collect();
        if keep.iter().all(|flag| *flag) {
            return;
        }
        self.headers = filter_by(&self.headers, &keep);
        for row in &mut self.rows {
            *row = filter_by(row, &keep);
        }
    }
}

fn filter_by(cells: &[String], keep: &[bool]) -> Vec<String> {
    cells
        .iter()
        .zip(keep)
        .filter(|(_, flag)| **flag)
        .map(|(cell, _)| cell.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn drops_blank_rows_and_columns() {
        let mut t = table(
            &["id", "", "period"],
            &[&["1", "", "3.5"], &["", "", ""], &["2", "", "4.1"]],
        );
        t.drop_degenerate();
        assert_eq!(t.headers, vec!["id", "period"]);
        assert_eq!(t.height(), 2);
        assert_eq!(t.cell(1, 1), "4.1");
    }

    #[test]
    fn keeps_unnamed_column_with_data() {
        let mut t = table(&["id", ""], &[&["1", "x"]]);
        t.drop_degenerate();
        assert_eq!(t.width(), 2);
    }

    #[test]
    fn out_of_range_cell_is_empty() {
        let t = table(&["id"], &[&["1"]]);
        assert_eq!(t.cell(0, 5), "");
        assert_eq!(t.cell(5, 0), "");
    }
}
