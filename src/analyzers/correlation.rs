//! Pairwise Pearson correlation over numeric columns.

use serde::{Deserialize, Serialize};

use crate::table::{Column, Table};

/// A symmetric correlation matrix over the numeric columns of a table.
///
/// The diagonal is exactly 1.0. Entries involving a zero-variance column
/// divide by zero and come out NaN; that degenerate case is deliberate, not
/// special-cased (serde_json renders non-finite floats as `null`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    /// Column names, one per matrix axis.
    pub columns: Vec<String>,
    /// Coefficients in row-major order: `values[i][j]` correlates
    /// `columns[i]` with `columns[j]`.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Number of columns (the matrix is `size` x `size`).
    pub fn size(&self) -> usize {
        self.columns.len()
    }

    /// Looks up the coefficient for a pair of column names.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        self.values.get(i)?.get(j).copied()
    }
}

/// Computes the Pearson correlation matrix, or `None` when the table has
/// fewer than two numeric columns.
///
/// Each pair is correlated over its pairwise-complete observations: rows
/// where either cell is missing are skipped for that pair only.
pub fn correlation_matrix(table: &Table) -> Option<CorrelationMatrix> {
    let names = table.numeric_column_names();
    if names.len() < 2 {
        return None;
    }

    let columns: Vec<&Vec<Option<f64>>> = names
        .iter()
        .filter_map(|name| match table.column(name) {
            Some(Column::Numeric(values)) => Some(values),
            _ => None,
        })
        .collect();

    let n = columns.len();
    let mut values = vec![vec![0.0; n]; n];
    for i in 0..n {
        values[i][i] = 1.0;
        for j in (i + 1)..n {
            let r = pearson(columns[i], columns[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Some(CorrelationMatrix {
        columns: names.into_iter().map(String::from).collect(),
        values,
    })
}

fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();

    if pairs.is_empty() {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    // Zero variance makes this 0/0.
    cov / (var_x.sqrt() * var_y.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: Vec<(&str, Vec<Option<f64>>)>) -> Table {
        Table::new(
            columns
                .into_iter()
                .map(|(name, values)| (name.to_string(), Column::Numeric(values)))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_requires_two_numeric_columns() {
        let single = table(vec![("x", vec![Some(1.0), Some(2.0)])]);
        assert!(correlation_matrix(&single).is_none());
    }

    #[test]
    fn test_perfect_positive_and_negative() {
        let t = table(vec![
            ("x", vec![Some(1.0), Some(2.0), Some(3.0)]),
            ("y", vec![Some(2.0), Some(4.0), Some(6.0)]),
            ("z", vec![Some(3.0), Some(2.0), Some(1.0)]),
        ]);
        let matrix = correlation_matrix(&t).unwrap();

        assert!((matrix.get("x", "y").unwrap() - 1.0).abs() < 1e-12);
        assert!((matrix.get("x", "z").unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_symmetric_with_unit_diagonal() {
        let t = table(vec![
            ("a", vec![Some(1.0), Some(5.0), Some(2.0), Some(4.0)]),
            ("b", vec![Some(9.0), Some(1.0), Some(7.0), Some(3.0)]),
            ("c", vec![Some(2.0), Some(2.0), Some(8.0), Some(1.0)]),
        ]);
        let matrix = correlation_matrix(&t).unwrap();

        for i in 0..matrix.size() {
            assert_eq!(matrix.values[i][i], 1.0);
            for j in 0..matrix.size() {
                assert_eq!(matrix.values[i][j], matrix.values[j][i]);
            }
        }
    }

    #[test]
    fn test_pairwise_complete_skips_missing_rows() {
        let t = table(vec![
            ("x", vec![Some(1.0), None, Some(3.0), Some(4.0)]),
            ("y", vec![Some(2.0), Some(100.0), Some(6.0), Some(8.0)]),
        ]);
        let matrix = correlation_matrix(&t).unwrap();
        // The row with the missing x is skipped, leaving a perfect line.
        assert!((matrix.get("x", "y").unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_variance_yields_nan() {
        let t = table(vec![
            ("x", vec![Some(5.0), Some(5.0), Some(5.0)]),
            ("y", vec![Some(1.0), Some(2.0), Some(3.0)]),
        ]);
        let matrix = correlation_matrix(&t).unwrap();
        assert!(matrix.get("x", "y").unwrap().is_nan());
        assert_eq!(matrix.get("x", "x"), Some(1.0));
    }
}
