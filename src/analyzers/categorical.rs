//! Frequency summaries for text columns.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::table::{Column, Table};

/// How many values `value_counts` keeps per column.
const TOP_N: usize = 5;

/// One value and its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: String,
    pub count: u64,
}

/// Frequency summary of one text column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalSummary {
    pub column: String,
    /// Count of distinct non-missing values.
    pub unique_count: usize,
    /// The value with the highest occurrence count; ties break to the
    /// first-encountered value. Absent when the column is entirely missing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_frequent: Option<String>,
    /// The top values by descending count (ties by first-encountered
    /// order), limited to the five most frequent.
    pub value_counts: Vec<ValueCount>,
}

/// Summarizes every text column, or `None` when the table has no text
/// columns.
pub fn categorical_summary(table: &Table) -> Option<Vec<CategoricalSummary>> {
    let names = table.text_column_names();
    if names.is_empty() {
        return None;
    }

    let summaries = names
        .into_iter()
        .map(|name| {
            let values = match table.column(name) {
                Some(Column::Text(v)) => v.as_slice(),
                _ => &[],
            };
            summarize_column(name, values)
        })
        .collect();
    Some(summaries)
}

fn summarize_column(name: &str, values: &[Option<String>]) -> CategoricalSummary {
    // value -> (count, first row index), the index preserving encounter
    // order for tie-breaking.
    let mut counts: HashMap<&str, (u64, usize)> = HashMap::new();
    for (row, cell) in values.iter().enumerate() {
        if let Some(value) = cell {
            counts
                .entry(value.as_str())
                .and_modify(|(count, _)| *count += 1)
                .or_insert((1, row));
        }
    }

    let mut ranked: Vec<(&str, u64, usize)> = counts
        .into_iter()
        .map(|(value, (count, first))| (value, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    CategoricalSummary {
        column: name.to_string(),
        unique_count: ranked.len(),
        most_frequent: ranked.first().map(|(value, _, _)| value.to_string()),
        value_counts: ranked
            .into_iter()
            .take(TOP_N)
            .map(|(value, count, _)| ValueCount {
                value: value.to_string(),
                count,
            })
            .collect(),
    }
}
