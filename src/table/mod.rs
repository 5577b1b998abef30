//! In-memory tabular data model.
//!
//! A [`Table`] is an ordered sequence of named columns of equal length. Each
//! [`Column`] is a closed tagged variant carrying its own typed storage, so
//! shared operations (missing-value detection, equality for de-duplication)
//! dispatch on the variant tag rather than runtime type inspection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::{Result, SiftError};

/// The logical type of a column, inferred at load time from parsed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Floating-point values.
    Numeric,
    /// Free-form strings.
    Text,
    /// Calendar dates.
    Temporal,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Numeric => "numeric",
            DataType::Text => "text",
            DataType::Temporal => "temporal",
        };
        write!(f, "{name}")
    }
}

/// A single typed column. `None` cells are missing values.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
    Temporal(Vec<Option<NaiveDate>>),
}

impl Column {
    /// Number of cells in the column (including missing ones).
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(v) => v.len(),
            Column::Text(v) => v.len(),
            Column::Temporal(v) => v.len(),
        }
    }

    /// Whether the column has zero cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The logical type of this column.
    pub fn data_type(&self) -> DataType {
        match self {
            Column::Numeric(_) => DataType::Numeric,
            Column::Text(_) => DataType::Text,
            Column::Temporal(_) => DataType::Temporal,
        }
    }

    /// Count of missing cells.
    pub fn null_count(&self) -> usize {
        match self {
            Column::Numeric(v) => v.iter().filter(|c| c.is_none()).count(),
            Column::Text(v) => v.iter().filter(|c| c.is_none()).count(),
            Column::Temporal(v) => v.iter().filter(|c| c.is_none()).count(),
        }
    }

    /// Whether the cell at `row` is missing.
    pub fn is_null(&self, row: usize) -> bool {
        match self {
            Column::Numeric(v) => v[row].is_none(),
            Column::Text(v) => v[row].is_none(),
            Column::Temporal(v) => v[row].is_none(),
        }
    }

    /// A hashable key for the cell at `row`, used for duplicate detection.
    ///
    /// Numeric cells are keyed by their bit pattern so that NaN compares
    /// equal to NaN, matching how de-duplication treats repeated sentinel
    /// values.
    pub fn cell_key(&self, row: usize) -> CellKey {
        match self {
            Column::Numeric(v) => match v[row] {
                Some(x) => CellKey::Number(x.to_bits()),
                None => CellKey::Null,
            },
            Column::Text(v) => match &v[row] {
                Some(s) => CellKey::Text(s.clone()),
                None => CellKey::Null,
            },
            Column::Temporal(v) => match v[row] {
                Some(d) => CellKey::Date(d),
                None => CellKey::Null,
            },
        }
    }

    /// The cell at `row` rendered as a string, or `None` when missing.
    /// Dates render as `YYYY-MM-DD`; whole numbers render without a
    /// fractional part.
    pub fn cell_display(&self, row: usize) -> Option<String> {
        match self {
            Column::Numeric(v) => v[row].map(|x| x.to_string()),
            Column::Text(v) => v[row].clone(),
            Column::Temporal(v) => v[row].map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }

    /// Non-missing numeric values, in row order. Empty for non-numeric columns.
    pub fn numeric_values(&self) -> Vec<f64> {
        match self {
            Column::Numeric(v) => v.iter().filter_map(|c| *c).collect(),
            _ => Vec::new(),
        }
    }
}

/// A hashable representation of one cell, used to build row keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CellKey {
    Null,
    Number(u64),
    Text(String),
    Date(NaiveDate),
}

/// A hashable representation of one full row.
pub type RowKey = Vec<CellKey>;

/// An ordered collection of named, equal-length columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<(String, Column)>,
    rows: usize,
}

impl Default for Table {
    /// An empty table: no columns, no rows.
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            rows: 0,
        }
    }
}

impl Table {
    /// Creates a table from named columns, enforcing the two structural
    /// invariants: column names are unique and all columns have the same
    /// length.
    pub fn new(columns: Vec<(String, Column)>) -> Result<Self> {
        let rows = columns.first().map(|(_, c)| c.len()).unwrap_or(0);

        let mut seen = HashSet::new();
        for (name, column) in &columns {
            if !seen.insert(name.as_str()) {
                return Err(SiftError::invalid_data(format!(
                    "duplicate column name '{name}'"
                )));
            }
            if column.len() != rows {
                return Err(SiftError::invalid_data(format!(
                    "column '{name}' has {} rows, expected {rows}",
                    column.len()
                )));
            }
        }

        Ok(Self { columns, rows })
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns.len())
    }

    /// Column names in table order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Iterates over `(name, column)` pairs in table order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(name, col)| (name.as_str(), col))
    }

    /// Looks up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }

    /// Names of numeric-typed columns, in table order.
    pub fn numeric_column_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|(_, c)| c.data_type() == DataType::Numeric)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Names of text-typed columns, in table order.
    pub fn text_column_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|(_, c)| c.data_type() == DataType::Text)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Whether the row at `row` has at least one missing cell.
    pub fn row_has_null(&self, row: usize) -> bool {
        self.columns.iter().any(|(_, c)| c.is_null(row))
    }

    /// Total count of missing cells across the whole table.
    pub fn missing_cell_count(&self) -> usize {
        self.columns.iter().map(|(_, c)| c.null_count()).sum()
    }

    /// A hashable key for the row at `row`, spanning every column.
    pub fn row_key(&self, row: usize) -> RowKey {
        self.columns.iter().map(|(_, c)| c.cell_key(row)).collect()
    }

    /// Count of rows that are exact duplicates of an earlier row.
    pub fn duplicate_row_count(&self) -> usize {
        let mut seen = HashSet::with_capacity(self.rows);
        let mut duplicates = 0;
        for row in 0..self.rows {
            if !seen.insert(self.row_key(row)) {
                duplicates += 1;
            }
        }
        duplicates
    }

    /// Builds a new table containing only the rows whose indices appear in
    /// `keep`, in the given order. Indices must be in bounds.
    pub fn select_rows(&self, keep: &[usize]) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|(name, col)| {
                let filtered = match col {
                    Column::Numeric(v) => Column::Numeric(keep.iter().map(|&i| v[i]).collect()),
                    Column::Text(v) => {
                        Column::Text(keep.iter().map(|&i| v[i].clone()).collect())
                    }
                    Column::Temporal(v) => Column::Temporal(keep.iter().map(|&i| v[i]).collect()),
                };
                (name.clone(), filtered)
            })
            .collect();
        Table {
            columns,
            rows: keep.len(),
        }
    }
}
