//! Descriptive analysis of a cleaned table.
//!
//! [`analyze`] builds an [`AnalysisResult`] in a single pass over the table.
//! Facets that do not apply (numeric statistics on a table with no numeric
//! columns, categorical summaries with no text columns) are absent as
//! `None`, never present-but-empty.

pub mod categorical;
pub mod correlation;
pub mod quality;
pub mod summary;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::table::{DataType, Table};

pub use categorical::{CategoricalSummary, ValueCount};
pub use correlation::CorrelationMatrix;
pub use quality::CustomMetrics;
pub use summary::{NumericColumnSummary, StatsTable};

/// Row and column counts of the analyzed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableShape {
    pub rows: usize,
    pub columns: usize,
}

/// Per-column type and missing-value facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnFacts {
    pub name: String,
    pub dtype: DataType,
    pub null_count: usize,
}

/// Options controlling which analysis facets are computed.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Compute the pairwise correlation matrix (requires at least two
    /// numeric columns).
    pub include_correlations: bool,
    /// Compute the derived quality metrics (completeness, duplicate rate).
    pub custom_analysis: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            include_correlations: true,
            custom_analysis: true,
        }
    }
}

impl AnalysisOptions {
    /// Sets whether correlations are computed.
    pub fn with_correlations(mut self, enabled: bool) -> Self {
        self.include_correlations = enabled;
        self
    }

    /// Sets whether the derived quality metrics are computed.
    pub fn with_custom_analysis(mut self, enabled: bool) -> Self {
        self.custom_analysis = enabled;
        self
    }
}

/// The complete output of one analysis run.
///
/// Built once per pipeline run from a cleaned [`Table`] and immutable
/// thereafter; consumed by the reporter and the persister.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Dataset shape.
    pub shape: TableShape,
    /// Per-column dtype and null count, in table order.
    pub columns: Vec<ColumnFacts>,
    /// Names of numeric columns. Absent when the table has none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric_columns: Option<Vec<String>>,
    /// Mean and standard deviation per numeric column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric_summary: Option<Vec<NumericColumnSummary>>,
    /// Row-indexed describe() table over the numeric columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basic_stats: Option<StatsTable>,
    /// Pearson correlation matrix over the numeric columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlations: Option<CorrelationMatrix>,
    /// Frequency summaries per text column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categorical_summary: Option<Vec<CategoricalSummary>>,
    /// Derived quality metrics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_metrics: Option<CustomMetrics>,
}

/// Analyzes a table, computing every facet enabled by `options`.
///
/// Deterministic for identical input and flags, aside from the wall-clock
/// timestamp embedded in the custom metrics.
#[instrument(skip(table, options), fields(rows = table.row_count(), cols = table.column_count()))]
pub fn analyze(table: &Table, options: &AnalysisOptions) -> AnalysisResult {
    let (rows, columns) = table.shape();

    let facts = table
        .columns()
        .map(|(name, col)| ColumnFacts {
            name: name.to_string(),
            dtype: col.data_type(),
            null_count: col.null_count(),
        })
        .collect();

    let numeric_names: Vec<String> = table
        .numeric_column_names()
        .into_iter()
        .map(String::from)
        .collect();

    let numeric_columns = if numeric_names.is_empty() {
        None
    } else {
        Some(numeric_names.clone())
    };

    let correlations = if options.include_correlations {
        correlation::correlation_matrix(table)
    } else {
        None
    };

    let custom_metrics = options.custom_analysis.then(|| quality::custom_metrics(table));

    let result = AnalysisResult {
        shape: TableShape { rows, columns },
        columns: facts,
        numeric_columns,
        numeric_summary: summary::numeric_summary(table),
        basic_stats: summary::describe(table),
        correlations,
        categorical_summary: categorical::categorical_summary(table),
        custom_metrics,
    };

    info!(
        rows,
        columns,
        numeric = result.numeric_columns.as_ref().map_or(0, Vec::len),
        categorical = result.categorical_summary.as_ref().map_or(0, Vec::len),
        correlations = result.correlations.is_some(),
        "analysis complete"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    #[test]
    fn test_text_only_table_omits_numeric_facets() {
        let table = Table::new(vec![(
            "name".to_string(),
            Column::Text(vec![Some("a".to_string()), Some("b".to_string())]),
        )])
        .unwrap();
        let result = analyze(&table, &AnalysisOptions::default());

        assert!(result.numeric_columns.is_none());
        assert!(result.numeric_summary.is_none());
        assert!(result.basic_stats.is_none());
        assert!(result.correlations.is_none());
        assert!(result.categorical_summary.is_some());
    }

    #[test]
    fn test_correlations_respect_flag() {
        let table = Table::new(vec![
            ("x".to_string(), Column::Numeric(vec![Some(1.0), Some(2.0)])),
            ("y".to_string(), Column::Numeric(vec![Some(2.0), Some(4.0)])),
        ])
        .unwrap();

        let with = analyze(&table, &AnalysisOptions::default());
        assert!(with.correlations.is_some());

        let without = analyze(&table, &AnalysisOptions::default().with_correlations(false));
        assert!(without.correlations.is_none());
    }

    #[test]
    fn test_custom_metrics_respect_flag() {
        let table = Table::new(vec![(
            "x".to_string(),
            Column::Numeric(vec![Some(1.0)]),
        )])
        .unwrap();
        let result = analyze(&table, &AnalysisOptions::default().with_custom_analysis(false));
        assert!(result.custom_metrics.is_none());
    }

    #[test]
    fn test_column_facts_preserve_order_and_nulls() {
        let table = Table::new(vec![
            ("b".to_string(), Column::Numeric(vec![Some(1.0), None])),
            (
                "a".to_string(),
                Column::Text(vec![Some("x".to_string()), Some("y".to_string())]),
            ),
        ])
        .unwrap();
        let result = analyze(&table, &AnalysisOptions::default());

        assert_eq!(result.columns[0].name, "b");
        assert_eq!(result.columns[0].dtype, DataType::Numeric);
        assert_eq!(result.columns[0].null_count, 1);
        assert_eq!(result.columns[1].name, "a");
        assert_eq!(result.columns[1].dtype, DataType::Text);
    }

    #[test]
    fn test_serialized_result_omits_absent_facets() {
        let table = Table::new(vec![(
            "name".to_string(),
            Column::Text(vec![Some("a".to_string())]),
        )])
        .unwrap();
        let result = analyze(&table, &AnalysisOptions::default());
        let json = serde_json::to_value(&result).unwrap();

        assert!(json.get("numeric_summary").is_none());
        assert!(json.get("correlations").is_none());
        assert!(json.get("categorical_summary").is_some());
    }
}
