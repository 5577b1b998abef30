//! Data cleaning: missing-value handling, de-duplication, text normalization.
//!
//! Exactly one missing-value policy is active per invocation, selected by
//! [`PreprocessOptions`]. De-duplication and whitespace stripping always run
//! afterward, so re-running `preprocess` with identical options is a no-op.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use tracing::{info, instrument};

use crate::error::SiftError;
use crate::table::{Column, Table};

/// Strategy for replacing missing values in numeric columns (Mean, Median,
/// Mode) or across the whole table in row order (Forward, Backward).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMethod {
    /// Per-column arithmetic mean of the non-missing values.
    Mean,
    /// Per-column median of the non-missing values.
    Median,
    /// Per-column most frequent value; ties break to the smallest value.
    Mode,
    /// Propagate the nearest preceding non-missing value, every column.
    Forward,
    /// Propagate the nearest following non-missing value, every column.
    Backward,
}

impl fmt::Display for FillMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FillMethod::Mean => "mean",
            FillMethod::Median => "median",
            FillMethod::Mode => "mode",
            FillMethod::Forward => "forward",
            FillMethod::Backward => "backward",
        };
        write!(f, "{name}")
    }
}

impl FromStr for FillMethod {
    type Err = SiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mean" => Ok(FillMethod::Mean),
            "median" => Ok(FillMethod::Median),
            "mode" => Ok(FillMethod::Mode),
            "forward" => Ok(FillMethod::Forward),
            "backward" => Ok(FillMethod::Backward),
            other => Err(SiftError::invalid_data(format!(
                "unknown fill method '{other}' (expected mean, median, mode, forward, or backward)"
            ))),
        }
    }
}

/// Options controlling the preprocessing pass.
#[derive(Debug, Clone)]
pub struct PreprocessOptions {
    /// Drop every row containing at least one missing value.
    pub drop_na: bool,
    /// Fill missing values instead of dropping rows. Ignored when `drop_na`
    /// is also set; filling only runs when `fill_na` is set and `drop_na`
    /// is not.
    pub fill_na: bool,
    /// Strategy used when filling.
    pub fill_method: FillMethod,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            drop_na: true,
            fill_na: false,
            fill_method: FillMethod::Mean,
        }
    }
}

impl PreprocessOptions {
    /// Sets whether rows with missing values are dropped.
    pub fn with_drop_na(mut self, drop_na: bool) -> Self {
        self.drop_na = drop_na;
        self
    }

    /// Sets whether missing values are filled.
    pub fn with_fill_na(mut self, fill_na: bool) -> Self {
        self.fill_na = fill_na;
        self
    }

    /// Sets the fill strategy.
    pub fn with_fill_method(mut self, method: FillMethod) -> Self {
        self.fill_method = method;
        self
    }
}

/// Cleans a table: applies the configured missing-value policy, removes rows
/// that exactly duplicate an earlier row (first occurrence kept, order
/// preserved), and strips leading/trailing whitespace from text cells.
///
/// Returns a new table; the input is never mutated.
#[instrument(skip(table, options), fields(rows_in = table.row_count()))]
pub fn preprocess(table: &Table, options: &PreprocessOptions) -> Table {
    let rows_before = table.row_count();

    let mut working = if options.fill_na && !options.drop_na {
        fill_missing(table, options.fill_method)
    } else if options.drop_na {
        drop_missing_rows(table)
    } else {
        table.clone()
    };

    // Trim before de-duplicating so rows differing only by surrounding
    // whitespace collapse in the same pass, keeping preprocess idempotent.
    working = normalize_text(&working);
    working = drop_duplicate_rows(&working);

    info!(
        rows_before,
        rows_after = working.row_count(),
        dropped = rows_before - working.row_count(),
        "preprocessing complete"
    );
    working
}

fn drop_missing_rows(table: &Table) -> Table {
    let keep: Vec<usize> = (0..table.row_count())
        .filter(|&row| !table.row_has_null(row))
        .collect();
    table.select_rows(&keep)
}

fn drop_duplicate_rows(table: &Table) -> Table {
    let mut seen = HashSet::with_capacity(table.row_count());
    let keep: Vec<usize> = (0..table.row_count())
        .filter(|&row| seen.insert(table.row_key(row)))
        .collect();
    if keep.len() == table.row_count() {
        table.clone()
    } else {
        table.select_rows(&keep)
    }
}

fn normalize_text(table: &Table) -> Table {
    let columns = table
        .columns()
        .map(|(name, col)| {
            let normalized = match col {
                Column::Text(values) => Column::Text(
                    values
                        .iter()
                        .map(|cell| cell.as_ref().map(|s| s.trim().to_string()))
                        .collect(),
                ),
                other => other.clone(),
            };
            (name.to_string(), normalized)
        })
        .collect();
    // Row counts are untouched here, so the invariants still hold.
    Table::new(columns).unwrap_or_else(|_| table.clone())
}

fn fill_missing(table: &Table, method: FillMethod) -> Table {
    match method {
        FillMethod::Mean => fill_numeric_with(table, mean),
        FillMethod::Median => fill_numeric_with(table, median),
        FillMethod::Mode => fill_numeric_with(table, mode),
        FillMethod::Forward => fill_directional(table, Direction::Forward),
        FillMethod::Backward => fill_directional(table, Direction::Backward),
    }
}

/// Replaces missing cells in each numeric column with a statistic of that
/// column's non-missing values. Columns with no non-missing values are left
/// alone. Non-numeric columns are untouched.
fn fill_numeric_with(table: &Table, stat: fn(&[f64]) -> Option<f64>) -> Table {
    let columns = table
        .columns()
        .map(|(name, col)| {
            let filled = match col {
                Column::Numeric(values) => {
                    let present = col.numeric_values();
                    match stat(&present) {
                        Some(fill) => Column::Numeric(
                            values.iter().map(|cell| cell.or(Some(fill))).collect(),
                        ),
                        None => col.clone(),
                    }
                }
                other => other.clone(),
            };
            (name.to_string(), filled)
        })
        .collect();
    Table::new(columns).unwrap_or_else(|_| table.clone())
}

enum Direction {
    Forward,
    Backward,
}

/// Propagates the nearest non-missing value in row order across every
/// column. Leading cells (forward) or trailing cells (backward) with no
/// neighbor to copy from stay missing.
fn fill_directional(table: &Table, direction: Direction) -> Table {
    fn propagate<T: Clone>(values: &[Option<T>], direction: &Direction) -> Vec<Option<T>> {
        let mut out = values.to_vec();
        match direction {
            Direction::Forward => {
                let mut last: Option<T> = None;
                for cell in out.iter_mut() {
                    match cell {
                        Some(v) => last = Some(v.clone()),
                        None => *cell = last.clone(),
                    }
                }
            }
            Direction::Backward => {
                let mut next: Option<T> = None;
                for cell in out.iter_mut().rev() {
                    match cell {
                        Some(v) => next = Some(v.clone()),
                        None => *cell = next.clone(),
                    }
                }
            }
        }
        out
    }

    let columns = table
        .columns()
        .map(|(name, col)| {
            let filled = match col {
                Column::Numeric(v) => Column::Numeric(propagate(v, &direction)),
                Column::Text(v) => Column::Text(propagate(v, &direction)),
                Column::Temporal(v) => Column::Temporal(propagate(v, &direction)),
            };
            (name.to_string(), filled)
        })
        .collect();
    Table::new(columns).unwrap_or_else(|_| table.clone())
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

pub(crate) fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Most frequent value; ties break to the smallest value, matching the first
/// row of a sorted mode table.
pub(crate) fn mode(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut counts: HashMap<u64, usize> = HashMap::new();
    for v in values {
        *counts.entry(v.to_bits()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(bits, count)| (f64::from_bits(bits), count))
        .max_by(|(a, ca), (b, cb)| {
            ca.cmp(cb).then_with(|| {
                // Higher rank for the smaller value so it wins the tie.
                b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal)
            })
        })
        .map(|(v, _)| v)
}
