//! Plain-text report rendering and console summaries.
//!
//! [`render_report`] produces the fixed-layout report persisted alongside
//! the structured outputs; [`print_summary`] writes an abbreviated view of
//! the same facets to the console. Both are purely presentational.

use std::fmt::Write;

use chrono::Utc;

use crate::analyzers::AnalysisResult;

/// Configuration for the plain-text report layout.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Title line of the report.
    pub title: String,
    /// Width of the `=` rules framing the report.
    pub rule_width: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "DATA ANALYSIS REPORT".to_string(),
            rule_width: 50,
        }
    }
}

impl ReportConfig {
    /// Sets the title line.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the rule width.
    pub fn with_rule_width(mut self, width: usize) -> Self {
        self.rule_width = width;
        self
    }
}

/// Renders the fixed-layout plain-text report with the default layout.
pub fn render_report(result: &AnalysisResult) -> String {
    render_report_with(result, &ReportConfig::default())
}

/// Renders the plain-text report with a custom layout.
pub fn render_report_with(result: &AnalysisResult, config: &ReportConfig) -> String {
    let mut out = String::new();
    let rule = "=".repeat(config.rule_width);

    let generated = result
        .custom_metrics
        .as_ref()
        .map(|m| m.generated_at)
        .unwrap_or_else(Utc::now);

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "{}", config.title);
    let _ = writeln!(out, "Generated: {}", generated.format("%Y-%m-%d %H:%M:%S UTC"));
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Dataset Shape: {} rows x {} columns",
        result.shape.rows, result.shape.columns
    );

    if let Some(metrics) = &result.custom_metrics {
        let _ = writeln!(out, "Data Completeness: {:.1}%", metrics.data_completeness);
        let _ = writeln!(out, "Duplicate Rate: {:.1}%", metrics.duplicate_rate);
    }

    if let Some(summary) = &result.numeric_summary {
        let _ = writeln!(out);
        let _ = writeln!(out, "NUMERIC COLUMNS:");
        for column in summary {
            let _ = writeln!(
                out,
                "  {}: mean={:.2}, std={:.2}",
                column.column, column.mean, column.std_dev
            );
        }
    }

    if let Some(categorical) = &result.categorical_summary {
        let _ = writeln!(out);
        let _ = writeln!(out, "CATEGORICAL COLUMNS:");
        for column in categorical {
            let _ = writeln!(
                out,
                "  {}: {} unique values",
                column.column, column.unique_count
            );
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{rule}");
    out
}

/// Prints an abbreviated summary of the result to the console.
pub fn print_summary(result: &AnalysisResult) {
    println!("\n=== ANALYSIS SUMMARY ===");
    println!(
        "Shape: {} rows x {} columns",
        result.shape.rows, result.shape.columns
    );

    if let Some(metrics) = &result.custom_metrics {
        println!(
            "Completeness: {:.1}% | Duplicates: {:.1}%",
            metrics.data_completeness, metrics.duplicate_rate
        );
    }

    if let Some(numeric) = &result.numeric_columns {
        println!("Numeric columns ({}): {}", numeric.len(), numeric.join(", "));
    }

    if let Some(categorical) = &result.categorical_summary {
        let names: Vec<&str> = categorical.iter().map(|c| c.column.as_str()).collect();
        println!(
            "Categorical columns ({}): {}",
            names.len(),
            names.join(", ")
        );
    }
}
