use clap::Parser;
use log::{error, info};
use neurowrangle_core::cli::{setup_logging, OutputFormat};
use neurowrangle_core::{ConsoleReporter, ExtractionSummary, ShellConfig, ShellExtractor, TextReport};
use std::path::PathBuf;
use std::process;

/// Extract b-value shells from a diffusion-weighted series
#[derive(Parser, Debug)]
#[command(name = "extract-shells")]
#[command(about = "Write a DWI series and bval/bvec files restricted to the requested shells")]
#[command(version)]
struct Cli {
    /// Input DWI (4D NIfTI)
    #[arg(short = 'i', long, value_name = "DWI")]
    dwi: PathBuf,

    /// Input b-values file
    #[arg(short = 'b', long, value_name = "BVAL")]
    bval: PathBuf,

    /// Input b-vectors file
    #[arg(short = 'r', long, value_name = "BVEC")]
    bvec: PathBuf,

    /// Shells to keep, in output order (e.g. 0 1000 2000)
    #[arg(short, long, num_args = 1.., required = true)]
    shells: Vec<f64>,

    /// Allowed b-value deviation around each shell
    #[arg(short, long, default_value_t = 0.0)]
    tolerance: f64,

    /// Output directory (defaults to the DWI directory)
    #[arg(short, long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

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

    if cli.tolerance < 0.0 {
        eprintln!("Error: tolerance must not be negative (got {})", cli.tolerance);
        process::exit(1);
    }

    let mut config = ShellConfig::new(cli.shells).with_tolerance(cli.tolerance);
    if let Some(out_dir) = cli.out_dir {
        config = config.with_out_dir(out_dir);
    }
    info!("Extracting shells {}", config.shell_identifier());

    let mut reporter = ConsoleReporter::default();
    match ShellExtractor::run(&cli.dwi, &cli.bval, &cli.bvec, &config, &mut reporter) {
        Ok(summary) => output_summary(&summary, cli.format),
        Err(e) => {
            error!("Shell extraction failed: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn output_summary(summary: &ExtractionSummary, format: OutputFormat) {
    match format {
        OutputFormat::Quiet => {}
        OutputFormat::Text => println!("\n{}", TextReport::new(summary)),
        OutputFormat::Json => {
            #[cfg(feature = "json")]
            {
                match neurowrangle_core::cli::to_json(summary) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        error!("Failed to serialize to JSON: {}", e);
                        eprintln!("Error: Failed to serialize to JSON: {}", e);
                        process::exit(1);
                    }
                }
            }
            #[cfg(not(feature = "json"))]
            {
                eprintln!("Error: JSON output requires the 'json' feature");
                eprintln!("Rebuild with: cargo build --features json");
                process::exit(1);
            }
        }
    }
}
