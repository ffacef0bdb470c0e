//! Indexed inter-country flow table.
//!
//! Rows are supplying country-industry pairs, columns are receiving pairs.
//! Composite labels are parsed once when the table is built and indexed as
//! `country -> industry -> position` on both axes, so per-query work is
//! direct lookups instead of string splitting.
//!
//! Storage is column-major and sparse: each column keeps only its non-zero,
//! finite entries, in original row order. That order is what makes top-K
//! selection stable under ties.

use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::model::{CompositeKey, CountryRegistry, KeyParseError};

/// Error type for flow table construction and lookups.
#[derive(Debug, Error)]
pub enum FlowError {
    /// The requested composite key is not a row/column of the table.
    ///
    /// Callers are expected to render a "no data for this selection" state.
    #[error("No data for {0}: key is not present in the flow table")]
    NotFound(String),

    /// A label could not be split into country and industry.
    #[error(transparent)]
    MalformedKey(#[from] KeyParseError),

    /// Dense input whose value rows do not line up with the labels.
    #[error("Flow table shape mismatch: expected {expected} values in row {row}, found {found}")]
    ShapeMismatch { row: usize, expected: usize, found: usize },

    /// Dense input with a different number of value rows than row labels.
    #[error("Flow table has {labels} row labels but {rows} value rows")]
    RowCountMismatch { labels: usize, rows: usize },
}

/// Convenience result type for flow table operations.
pub type FlowResult<T> = Result<T, FlowError>;

/// A single stored cell: row position plus value.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    row: usize,
    value: f64,
}

/// `country -> industry -> position` lookup for one axis.
#[derive(Debug, Clone, Default)]
struct AxisIndex {
    by_country: HashMap<String, HashMap<String, usize>>,
}

impl AxisIndex {
    fn insert(&mut self, key: &CompositeKey, position: usize) -> bool {
        let industries = self.by_country.entry(key.country.clone()).or_default();
        if industries.contains_key(&key.industry) {
            return false;
        }
        industries.insert(key.industry.clone(), position);
        true
    }

    fn get(&self, country: &str, industry: &str) -> Option<usize> {
        self.by_country.get(country).and_then(|m| m.get(industry)).copied()
    }

    fn contains(&self, key: &CompositeKey) -> bool {
        self.get(&key.country, &key.industry).is_some()
    }
}

/// Immutable, indexed flow matrix shared read-only between requests.
#[derive(Debug, Clone, Default)]
pub struct FlowTable {
    rows: Vec<CompositeKey>,
    columns: Vec<CompositeKey>,
    row_index: AxisIndex,
    column_index: AxisIndex,
    cells: Vec<Vec<Cell>>,
}

impl FlowTable {
    /// Build from a dense row-major matrix, as exported from an ICIO table.
    ///
    /// Rows and columns whose label does not parse, or whose country is not
    /// in `countries`, are dropped (aggregate rows such as value-added or
    /// output totals fall out here). Repeated labels keep the first
    /// occurrence. Zero and non-finite values are treated as absent.
    pub fn from_dense(
        row_labels: &[String],
        column_labels: &[String],
        values: &[Vec<f64>],
        countries: &CountryRegistry,
    ) -> FlowResult<Self> {
        if row_labels.len() != values.len() {
            return Err(FlowError::RowCountMismatch {
                labels: row_labels.len(),
                rows: values.len(),
            });
        }
        for (i, row) in values.iter().enumerate() {
            if row.len() != column_labels.len() {
                return Err(FlowError::ShapeMismatch {
                    row: i,
                    expected: column_labels.len(),
                    found: row.len(),
                });
            }
        }

        let mut table = FlowTable::default();
        let kept_rows =
            retain_known_labels(row_labels, countries, "row", |key| table.push_row(key));
        let kept_columns =
            retain_known_labels(column_labels, countries, "column", |key| table.push_column(key));

        for (row_pos, &source_row) in kept_rows.iter().enumerate() {
            for (col_pos, &source_col) in kept_columns.iter().enumerate() {
                let value = values[source_row][source_col];
                if value != 0.0 && value.is_finite() {
                    table.cells[col_pos].push(Cell { row: row_pos, value });
                }
            }
        }

        info!(
            rows = table.rows.len(),
            columns = table.columns.len(),
            dropped_rows = row_labels.len() - table.rows.len(),
            dropped_columns = column_labels.len() - table.columns.len(),
            "Built flow table"
        );
        Ok(table)
    }

    fn push_row(&mut self, key: CompositeKey) -> bool {
        if !self.row_index.insert(&key, self.rows.len()) {
            return false;
        }
        self.rows.push(key);
        true
    }

    fn push_column(&mut self, key: CompositeKey) -> bool {
        if !self.column_index.insert(&key, self.columns.len()) {
            return false;
        }
        self.columns.push(key);
        self.cells.push(Vec::new());
        true
    }

    /// Row keys in table order.
    pub fn rows(&self) -> &[CompositeKey] {
        &self.rows
    }

    /// Column keys in table order.
    pub fn columns(&self) -> &[CompositeKey] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of stored non-zero cells.
    pub fn stored_cells(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }

    pub fn has_column(&self, key: &CompositeKey) -> bool {
        self.column_index.contains(key)
    }

    pub fn has_row(&self, key: &CompositeKey) -> bool {
        self.row_index.contains(key)
    }

    /// Non-zero flows into `country_industry`, as `(source key, value)` in
    /// row order.
    pub fn column_flows(
        &self,
        country: &str,
        industry: &str,
    ) -> FlowResult<impl Iterator<Item = (&CompositeKey, f64)> + '_> {
        let col = self
            .column_index
            .get(country, industry)
            .ok_or_else(|| FlowError::NotFound(CompositeKey::new(country, industry).to_string()))?;
        Ok(self.cells[col].iter().map(move |cell| (&self.rows[cell.row], cell.value)))
    }

    /// Flow from `row` into `column`; absent cells read as `0.0`.
    ///
    /// Fails with `NotFound` if either key is not part of the table.
    pub fn value(&self, row: &CompositeKey, column: &CompositeKey) -> FlowResult<f64> {
        let row_pos = self
            .row_index
            .get(&row.country, &row.industry)
            .ok_or_else(|| FlowError::NotFound(row.to_string()))?;
        let col_pos = self
            .column_index
            .get(&column.country, &column.industry)
            .ok_or_else(|| FlowError::NotFound(column.to_string()))?;
        let cells = &self.cells[col_pos];
        Ok(cells.binary_search_by_key(&row_pos, |c| c.row).map(|i| cells[i].value).unwrap_or(0.0))
    }
}

fn retain_known_labels(
    labels: &[String],
    countries: &CountryRegistry,
    axis: &str,
    mut push: impl FnMut(CompositeKey) -> bool,
) -> Vec<usize> {
    let mut kept = Vec::new();
    for (i, label) in labels.iter().enumerate() {
        let key = match CompositeKey::parse(label) {
            Ok(key) if countries.contains(&key.country) => key,
            _ => {
                debug!(axis, label = label.as_str(), "Dropping label with unknown country prefix");
                continue;
            }
        };
        if push(key) {
            kept.push(i);
        } else {
            warn!(axis, label = label.as_str(), "Duplicate label ignored");
        }
    }
    kept
}

/// Incremental builder for sparse tables.
///
/// Rows and columns are ordered by first mention. Setting the same cell twice
/// keeps the last value.
#[derive(Debug, Default)]
pub struct FlowTableBuilder {
    table: FlowTable,
    pending: HashMap<(usize, usize), f64>,
}

impl FlowTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a row without any flows.
    pub fn row(mut self, label: &str) -> FlowResult<Self> {
        self.row_position(label)?;
        Ok(self)
    }

    /// Declare a column without any flows.
    pub fn column(mut self, label: &str) -> FlowResult<Self> {
        self.column_position(label)?;
        Ok(self)
    }

    /// Record a flow from `source` (row) into `target` (column).
    pub fn flow(mut self, source: &str, target: &str, value: f64) -> FlowResult<Self> {
        let row = self.row_position(source)?;
        let col = self.column_position(target)?;
        self.pending.insert((col, row), value);
        Ok(self)
    }

    fn row_position(&mut self, label: &str) -> FlowResult<usize> {
        let key = CompositeKey::parse(label)?;
        if let Some(pos) = self.table.row_index.get(&key.country, &key.industry) {
            return Ok(pos);
        }
        let pos = self.table.rows.len();
        self.table.push_row(key);
        Ok(pos)
    }

    fn column_position(&mut self, label: &str) -> FlowResult<usize> {
        let key = CompositeKey::parse(label)?;
        if let Some(pos) = self.table.column_index.get(&key.country, &key.industry) {
            return Ok(pos);
        }
        let pos = self.table.columns.len();
        self.table.push_column(key);
        Ok(pos)
    }

    pub fn build(self) -> FlowTable {
        let FlowTableBuilder { mut table, pending } = self;
        for ((col, row), value) in pending {
            if value != 0.0 && value.is_finite() {
                table.cells[col].push(Cell { row, value });
            }
        }
        for cells in &mut table.cells {
            cells.sort_by_key(|c| c.row);
        }
        table
    }
}
