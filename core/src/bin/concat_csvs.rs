use clap::Parser;
use log::{error, info};
use neurowrangle_core::cli::setup_logging;
use neurowrangle_core::{concat_csvs, ConsoleReporter, CsvConcatConfig};
use std::path::PathBuf;
use std::process;

/// Concatenate CSV files found under a directory tree
#[derive(Parser, Debug)]
#[command(name = "concat-csvs")]
#[command(about = "Stack every matching CSV under a directory into one table")]
#[command(version)]
struct Cli {
    /// Directory searched recursively
    #[arg(value_name = "PARENT_DIR")]
    parent_dir: PathBuf,

    /// Only collect files whose directory path contains this name
    #[arg(short, long)]
    sub_dir: Option<String>,

    /// Required filename ending
    #[arg(short, long, default_value = ".csv")]
    ends_with: String,

    /// Output filename, written inside PARENT_DIR
    #[arg(short, long, default_value = "all_csv_data.csv")]
    output: String,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if !cli.parent_dir.is_dir() {
        eprintln!("Error: {} is not a directory", cli.parent_dir.display());
        process::exit(1);
    }

    let mut config = CsvConcatConfig::new(cli.parent_dir)
        .with_ends_with(cli.ends_with)
        .with_output(cli.output);
    if let Some(sub_dir) = cli.sub_dir {
        config = config.with_sub_dir(sub_dir);
    }

    let mut reporter = ConsoleReporter::new(true);
    match concat_csvs(&config, &mut reporter) {
        Ok(summary) => info!(
            "Collected {} rows from {} files",
            summary.rows,
            summary.files.len()
        ),
        Err(e) => {
            error!("CSV concatenation failed: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
