use clap::{Parser, ValueEnum};
use log::{error, info};
use neurowrangle_core::cli::setup_logging;
use neurowrangle_core::{collect_gif_volumes, ConsoleReporter, GifConfig, GifMeasure};
use std::path::PathBuf;
use std::process;

/// Collect GIF parcellation volumes into one spreadsheet
#[derive(Parser, Debug)]
#[command(name = "read-gif")]
#[command(about = "Write one CSV row of regional volumes per GIF XML file")]
#[command(version)]
struct Cli {
    /// Directory searched recursively for GIF .xml files
    #[arg(value_name = "INDIR")]
    in_dir: PathBuf,

    /// Output CSV file
    #[arg(value_name = "OUTFILE")]
    out_file: PathBuf,

    /// Volume measure to collect
    #[arg(short, long, value_enum)]
    giftype: Option<MeasureArg>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// GIF volume measure
#[derive(Debug, Clone, ValueEnum)]
enum MeasureArg {
    /// Probabilistic volumes (volumeProb)
    Prob,
    /// Categorical volumes (volumeCat)
    Cat,
}

impl From<MeasureArg> for GifMeasure {
    fn from(arg: MeasureArg) -> Self {
        match arg {
            MeasureArg::Prob => GifMeasure::Prob,
            MeasureArg::Cat => GifMeasure::Cat,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if !cli.in_dir.is_dir() {
        eprintln!("Error: {} is not a directory", cli.in_dir.display());
        process::exit(1);
    }

    let measure = match cli.giftype {
        Some(arg) => arg.into(),
        None => {
            info!("No GIF measure given, using {}", GifMeasure::default());
            GifMeasure::default()
        }
    };
    let config = GifConfig::new(cli.in_dir, cli.out_file).with_measure(measure);

    let mut reporter = ConsoleReporter::default();
    match collect_gif_volumes(&config, &mut reporter) {
        Ok(summary) => info!(
            "Collected {} regions from {} files",
            summary.regions,
            summary.files.len()
        ),
        Err(e) => {
            error!("GIF collation failed: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
