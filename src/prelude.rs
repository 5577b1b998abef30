//! Prelude for commonly used types in tabsift.

pub use crate::analyzers::{analyze, AnalysisOptions, AnalysisResult};
pub use crate::error::{Result, SiftError};
pub use crate::logging::LoggingConfig;
pub use crate::persist::{save_results, OutputKind, SaveInput, SavedFiles};
pub use crate::preprocess::{preprocess, FillMethod, PreprocessOptions};
pub use crate::report::{print_summary, render_report};
pub use crate::sources::{CsvOptions, CsvSource};
pub use crate::table::{Column, DataType, Table};
pub use crate::validate::validate;
