//! Numeric summary statistics.
//!
//! Two facets come out of this module: the per-column mean/standard-deviation
//! pairs the report lists, and the row-indexed [`StatsTable`] (count, mean,
//! std, min, quartiles, max) the persister writes as the tabular output.

use serde::{Deserialize, Serialize};

use crate::preprocess::mean;
use crate::table::Table;

/// Row labels of the describe() table, in output order.
const DESCRIBE_INDEX: &[&str] = &["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// Mean and sample standard deviation of one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericColumnSummary {
    pub column: String,
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator). NaN when the column
    /// has fewer than two non-missing values.
    pub std_dev: f64,
}

/// A small row-indexed table of statistics: one row per index label, one
/// column per numeric source column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsTable {
    /// Row labels ("count", "mean", ...).
    pub index: Vec<String>,
    /// Column names, matching the numeric columns of the source table.
    pub columns: Vec<String>,
    /// Values in row-major order: `values[row][col]`.
    pub values: Vec<Vec<f64>>,
}

impl StatsTable {
    /// Looks up a single statistic by row label and column name.
    pub fn get(&self, stat: &str, column: &str) -> Option<f64> {
        let row = self.index.iter().position(|s| s == stat)?;
        let col = self.columns.iter().position(|c| c == column)?;
        self.values.get(row)?.get(col).copied()
    }
}

/// Computes mean and standard deviation for every numeric column, or `None`
/// when the table has no numeric columns.
pub fn numeric_summary(table: &Table) -> Option<Vec<NumericColumnSummary>> {
    let names = table.numeric_column_names();
    if names.is_empty() {
        return None;
    }

    let summaries = names
        .into_iter()
        .map(|name| {
            let values = table.column(name).map(|c| c.numeric_values()).unwrap_or_default();
            NumericColumnSummary {
                column: name.to_string(),
                mean: mean(&values).unwrap_or(f64::NAN),
                std_dev: std_dev(&values),
            }
        })
        .collect();
    Some(summaries)
}

/// Builds the describe() table over the numeric columns, or `None` when the
/// table has no numeric columns. Statistics are computed over non-missing
/// values; quantiles use linear interpolation.
pub fn describe(table: &Table) -> Option<StatsTable> {
    let names = table.numeric_column_names();
    if names.is_empty() {
        return None;
    }

    let per_column: Vec<Vec<f64>> = names
        .iter()
        .map(|name| {
            let mut values = table
                .column(name)
                .map(|c| c.numeric_values())
                .unwrap_or_default();
            values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            values
        })
        .collect();

    let values = DESCRIBE_INDEX
        .iter()
        .map(|stat| {
            per_column
                .iter()
                .map(|sorted| match *stat {
                    "count" => sorted.len() as f64,
                    "mean" => mean(sorted).unwrap_or(f64::NAN),
                    "std" => std_dev(sorted),
                    "min" => sorted.first().copied().unwrap_or(f64::NAN),
                    "25%" => quantile(sorted, 0.25),
                    "50%" => quantile(sorted, 0.50),
                    "75%" => quantile(sorted, 0.75),
                    "max" => sorted.last().copied().unwrap_or(f64::NAN),
                    _ => unreachable!("unknown describe row"),
                })
                .collect()
        })
        .collect();

    Some(StatsTable {
        index: DESCRIBE_INDEX.iter().map(|s| s.to_string()).collect(),
        columns: names.into_iter().map(String::from).collect(),
        values,
    })
}

/// Sample standard deviation. NaN for fewer than two values.
pub(crate) fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = values.iter().sum::<f64>() / values.len() as f64;
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

/// Linearly interpolated quantile of pre-sorted values. NaN when empty.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let frac = pos - lower as f64;
    if lower + 1 < sorted.len() {
        sorted[lower] + frac * (sorted[lower + 1] - sorted[lower])
    } else {
        sorted[lower]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    fn numeric_table() -> Table {
        Table::new(vec![
            (
                "a".to_string(),
                Column::Numeric(vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)]),
            ),
            (
                "b".to_string(),
                Column::Numeric(vec![Some(10.0), None, Some(30.0), None]),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_numeric_summary_values() {
        let summary = numeric_summary(&numeric_table()).unwrap();
        assert_eq!(summary.len(), 2);

        assert_eq!(summary[0].column, "a");
        assert!((summary[0].mean - 2.5).abs() < 1e-12);
        // Sample std of 1..4 is sqrt(5/3).
        assert!((summary[0].std_dev - (5.0f64 / 3.0).sqrt()).abs() < 1e-12);

        assert_eq!(summary[1].column, "b");
        assert!((summary[1].mean - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_numeric_columns_yields_none() {
        let table = Table::new(vec![(
            "t".to_string(),
            Column::Text(vec![Some("x".to_string())]),
        )])
        .unwrap();
        assert!(numeric_summary(&table).is_none());
        assert!(describe(&table).is_none());
    }

    #[test]
    fn test_describe_layout_and_values() {
        let stats = describe(&numeric_table()).unwrap();
        assert_eq!(stats.index.len(), 8);
        assert_eq!(stats.columns, vec!["a", "b"]);

        assert_eq!(stats.get("count", "a"), Some(4.0));
        assert_eq!(stats.get("count", "b"), Some(2.0));
        assert_eq!(stats.get("min", "a"), Some(1.0));
        assert_eq!(stats.get("max", "a"), Some(4.0));
        assert_eq!(stats.get("50%", "a"), Some(2.5));
        assert_eq!(stats.get("25%", "a"), Some(1.75));
        assert_eq!(stats.get("75%", "a"), Some(3.25));
    }

    #[test]
    fn test_std_dev_degenerate_cases() {
        assert!(std_dev(&[]).is_nan());
        assert!(std_dev(&[5.0]).is_nan());
        assert_eq!(std_dev(&[2.0, 2.0, 2.0]), 0.0);
    }

    #[test]
    fn test_single_value_quantiles() {
        let table = Table::new(vec![(
            "x".to_string(),
            Column::Numeric(vec![Some(7.0)]),
        )])
        .unwrap();
        let stats = describe(&table).unwrap();
        assert_eq!(stats.get("25%", "x"), Some(7.0));
        assert_eq!(stats.get("75%", "x"), Some(7.0));
        assert!(stats.get("std", "x").unwrap().is_nan());
    }
}
