use clap::Parser;
use log::error;
use neurowrangle_core::cli::{setup_logging, OutputFormat};
use neurowrangle_core::{ConsoleReporter, RegionCombiner, RegionConfig, RegionReport, RegionSummary};
use std::path::PathBuf;
use std::process;

/// Combine parcellation labels into a single binary mask
#[derive(Parser, Debug)]
#[command(name = "combine-rois")]
#[command(about = "Write a 0/1 mask of all voxels carrying one of the given labels")]
#[command(version)]
struct Cli {
    /// Input label image (NIfTI)
    #[arg(short, long, value_name = "LABELS")]
    input: PathBuf,

    /// Label ids to merge
    #[arg(short, long, num_args = 1.., required = true)]
    regions: Vec<i64>,

    /// Output mask path
    #[arg(short, long, value_name = "MASK")]
    out_mask: PathBuf,

    /// Summary printed after the run
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Quiet)]
    format: OutputFormat,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if !cli.input.is_file() {
        eprintln!("Error: {} is not a file", cli.input.display());
        process::exit(1);
    }

    let config = RegionConfig::new(cli.regions, cli.out_mask);
    let mut reporter = ConsoleReporter::default();

    match RegionCombiner::run(&cli.input, &config, &mut reporter) {
        Ok(summary) => output_summary(&summary, cli.format),
        Err(e) => {
            error!("Region combination failed: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn output_summary(summary: &RegionSummary, format: OutputFormat) {
    match format {
        OutputFormat::Quiet => {}
        OutputFormat::Text => println!("\n{}", RegionReport::new(summary)),
        OutputFormat::Json => {
            #[cfg(feature = "json")]
            {
                match neurowrangle_core::cli::to_json(summary) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Error: Failed to serialize to JSON: {}", e);
                        process::exit(1);
                    }
                }
            }
            #[cfg(not(feature = "json"))]
            {
                eprintln!("Error: JSON output requires the 'json' feature");
                process::exit(1);
            }
        }
    }
}
