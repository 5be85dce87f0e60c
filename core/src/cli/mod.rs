pub mod report;

use clap::ValueEnum;

/// Output format options for run summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Only the per-file confirmation lines
    #[default]
    Quiet,
    /// Human-readable summary after the run
    Text,
    /// JSON summary after the run
    Json,
}

/// Installs env_logger
///
/// `RUST_LOG` takes precedence when set; otherwise `verbose` selects Debug
/// over Info.
pub fn setup_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(default_level(verbose));
    }
    builder.init();
}

fn default_level(verbose: bool) -> log::LevelFilter {
    if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    }
}

/// Serializes a summary as pretty JSON
#[cfg(feature = "json")]
pub fn to_json<T: serde::Serialize>(summary: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(true), log::LevelFilter::Debug);
        assert_eq!(default_level(false), log::LevelFilter::Info);
    }
}
