//! Derived data-quality metrics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::table::Table;

/// Derived quality metrics for an analyzed table.
///
/// `duplicate_rate` uses the same duplicate definition as preprocessing
/// (rows equal to an earlier row), so when analysis runs on a preprocessed
/// table it reads 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomMetrics {
    /// Percentage of cells that are non-missing: `(1 - missing / total) * 100`.
    pub data_completeness: f64,
    /// Percentage of rows that duplicate an earlier row.
    pub duplicate_rate: f64,
    /// When the analysis ran (UTC).
    pub generated_at: DateTime<Utc>,
}

/// Computes the quality metrics for a table. An empty table is fully
/// complete and duplicate-free by definition.
pub fn custom_metrics(table: &Table) -> CustomMetrics {
    let (rows, columns) = table.shape();
    let total_cells = rows * columns;

    let data_completeness = if total_cells == 0 {
        100.0
    } else {
        (1.0 - table.missing_cell_count() as f64 / total_cells as f64) * 100.0
    };

    let duplicate_rate = if rows == 0 {
        0.0
    } else {
        table.duplicate_row_count() as f64 / rows as f64 * 100.0
    };

    CustomMetrics {
        data_completeness,
        duplicate_rate,
        generated_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    #[test]
    fn test_complete_table_scores_100() {
        let table = Table::new(vec![
            ("a".to_string(), Column::Numeric(vec![Some(1.0), Some(2.0)])),
            (
                "b".to_string(),
                Column::Text(vec![Some("x".to_string()), Some("y".to_string())]),
            ),
        ])
        .unwrap();
        let metrics = custom_metrics(&table);

        assert_eq!(metrics.data_completeness, 100.0);
        assert_eq!(metrics.duplicate_rate, 0.0);
    }

    #[test]
    fn test_partial_completeness() {
        let table = Table::new(vec![(
            "a".to_string(),
            Column::Numeric(vec![Some(1.0), None, Some(3.0), None]),
        )])
        .unwrap();
        let metrics = custom_metrics(&table);
        assert!((metrics.data_completeness - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_duplicate_rate() {
        let table = Table::new(vec![(
            "a".to_string(),
            Column::Numeric(vec![Some(1.0), Some(1.0), Some(2.0), Some(1.0)]),
        )])
        .unwrap();
        let metrics = custom_metrics(&table);
        assert!((metrics.duplicate_rate - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_table_defaults() {
        let table = Table::new(vec![]).unwrap();
        let metrics = custom_metrics(&table);
        assert_eq!(metrics.data_completeness, 100.0);
        assert_eq!(metrics.duplicate_rate, 0.0);
    }
}
