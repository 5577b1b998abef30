//! Command-line driver for the tabsift analysis pipeline.
//!
//! Runs the full load -> validate -> preprocess -> analyze -> save flow over
//! a delimited input file. Every pipeline error is caught here, printed as a
//! user-facing message, and turned into a non-zero exit status.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use tabsift::error::SiftError;
use tabsift::logging::{init_logging, LoggingConfig};
use tabsift::persist::setup_directories;
use tabsift::prelude::*;
use tabsift::sample::create_sample_data;

/// Number of rows generated by `--create-sample`.
const SAMPLE_ROWS: usize = 50;

#[derive(Parser, Debug)]
#[command(name = "tabsift", version, about = "Batch tabular data analysis pipeline")]
struct Cli {
    /// Input CSV file path
    #[arg(short, long, default_value = "data/example.csv")]
    input: PathBuf,

    /// Output file base path
    #[arg(short, long, default_value = "output/results")]
    output: PathBuf,

    /// Create sample data if the input file doesn't exist
    #[arg(long)]
    create_sample: bool,

    /// Fill missing values instead of dropping rows that contain them
    #[arg(long)]
    fill_na: bool,

    /// Method for filling missing values
    #[arg(long, value_enum, default_value_t = FillMethodArg::Mean)]
    fill_method: FillMethodArg,

    /// Skip correlation analysis
    #[arg(long)]
    no_correlations: bool,

    /// List of required column names
    #[arg(long, num_args = 1.., value_name = "NAME")]
    required_columns: Option<Vec<String>>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum FillMethodArg {
    Mean,
    Median,
    Mode,
    Forward,
    Backward,
}

impl From<FillMethodArg> for FillMethod {
    fn from(arg: FillMethodArg) -> Self {
        match arg {
            FillMethodArg::Mean => FillMethod::Mean,
            FillMethodArg::Median => FillMethod::Median,
            FillMethodArg::Mode => FillMethod::Mode,
            FillMethodArg::Forward => FillMethod::Forward,
            FillMethodArg::Backward => FillMethod::Backward,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let logging = if cli.verbose {
        LoggingConfig::development()
    } else {
        LoggingConfig::default()
    };
    if let Err(err) = init_logging(logging) {
        eprintln!("Warning: could not initialize logging: {err}");
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}: {err}", err.category());
            if matches!(err, SiftError::NotFound { .. }) && !cli.create_sample {
                eprintln!("Tip: use --create-sample to generate test data");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    setup_directories(&["data", "output"])?;

    if cli.create_sample && !cli.input.exists() {
        println!("Creating sample data at {}...", cli.input.display());
        create_sample_data(&cli.input, SAMPLE_ROWS)?;
    }

    println!("Loading and validating data...");
    let table = CsvSource::new(&cli.input).load()?;
    let table = validate(table, cli.required_columns.as_deref())?;

    println!("Preprocessing data...");
    let options = PreprocessOptions::default()
        .with_drop_na(!cli.fill_na)
        .with_fill_na(cli.fill_na)
        .with_fill_method(cli.fill_method.into());
    let clean = preprocess(&table, &options);

    println!("Analyzing data...");
    let analysis_options = AnalysisOptions::default().with_correlations(!cli.no_correlations);
    let result = analyze(&clean, &analysis_options);

    println!("Saving results...");
    let saved = save_results(SaveInput::Analysis(&result), &cli.output, true)?;

    print_summary(&result);

    println!("\nFiles saved:");
    for (kind, path) in saved.iter() {
        println!("  {}: {}", kind.to_string().to_uppercase(), path.display());
    }

    println!("\nAnalysis pipeline completed successfully!");
    Ok(())
}
