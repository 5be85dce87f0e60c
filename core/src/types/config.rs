use super::{GifMeasure, RegionSet, ShellCriterion};
use std::path::PathBuf;

/// Configuration for extracting b-value shells from a DWI series
///
/// # Example
///
/// ```
/// use neurowrangle_core::ShellConfig;
///
/// let config = ShellConfig::new(vec![0.0, 1000.0]).with_tolerance(15.0);
///
/// assert_eq!(config.tolerance, 15.0);
/// assert_eq!(config.criteria().len(), 2);
/// assert_eq!(config.shell_identifier(), "b0_b1000");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ShellConfig {
    /// Nominal shells in the order they were requested
    pub shells: Vec<f64>,

    /// Symmetric window around each shell (0 means exact match)
    pub tolerance: f64,

    /// Output directory; `None` writes next to the input DWI
    pub out_dir: Option<PathBuf>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            shells: Vec::new(),
            tolerance: 0.0,
            out_dir: None,
        }
    }
}

impl ShellConfig {
    /// Creates a config for the given shells with exact matching
    pub fn new(shells: Vec<f64>) -> Self {
        Self {
            shells,
            ..Self::default()
        }
    }

    /// Builder: Set the b-value tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Builder: Set the output directory
    ///
    /// # Example
    ///
    /// ```
    /// use neurowrangle_core::ShellConfig;
    ///
    /// let config = ShellConfig::new(vec![0.0]).with_out_dir("derivatives/dwi");
    /// assert!(config.out_dir.is_some());
    /// ```
    pub fn with_out_dir(mut self, out_dir: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(out_dir.into());
        self
    }

    /// One criterion per requested shell, in request order
    pub fn criteria(&self) -> Vec<ShellCriterion> {
        self.shells
            .iter()
            .map(|&shell| ShellCriterion::new(shell, self.tolerance))
            .collect()
    }

    /// Joined shell identifiers used as filename suffix, e.g. `b0_b1000`
    pub fn shell_identifier(&self) -> String {
        self.criteria()
            .iter()
            .map(|c| c.identifier())
            .collect::<Vec<_>>()
            .join("_")
    }
}

/// Configuration for combining labelled regions into one binary mask
///
/// # Example
///
/// ```
/// use neurowrangle_core::RegionConfig;
///
/// let config = RegionConfig::new(vec![1001, 1002, 1003], "mask.nii.gz");
/// assert_eq!(config.regions.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct RegionConfig {
    /// Labels to merge
    pub regions: RegionSet,

    /// Exact output path of the mask
    pub out_mask: PathBuf,
}

impl RegionConfig {
    /// Creates a new RegionConfig
    pub fn new(regions: impl IntoIterator<Item = i64>, out_mask: impl Into<PathBuf>) -> Self {
        Self {
            regions: regions.into_iter().collect(),
            out_mask: out_mask.into(),
        }
    }
}

/// Configuration for collating many CSV files into one
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct CsvConcatConfig {
    /// Root directory that is searched recursively
    pub parent_dir: PathBuf,

    /// Only collect files whose directory path contains this string
    pub sub_dir: Option<String>,

    /// Required filename ending
    pub ends_with: String,

    /// Output filename, written inside `parent_dir`
    pub output: String,
}

impl CsvConcatConfig {
    /// Creates a config with the default `.csv` ending and `all_csv_data.csv` output
    ///
    /// # Example
    ///
    /// ```
    /// use neurowrangle_core::CsvConcatConfig;
    ///
    /// let config = CsvConcatConfig::new("/data/bids").with_sub_dir("dwi");
    /// assert_eq!(config.ends_with, ".csv");
    /// assert_eq!(config.output, "all_csv_data.csv");
    /// assert_eq!(config.sub_dir.as_deref(), Some("dwi"));
    /// ```
    pub fn new(parent_dir: impl Into<PathBuf>) -> Self {
        Self {
            parent_dir: parent_dir.into(),
            sub_dir: None,
            ends_with: ".csv".to_string(),
            output: "all_csv_data.csv".to_string(),
        }
    }

    /// Builder: Restrict collection to a subdirectory name
    pub fn with_sub_dir(mut self, sub_dir: impl Into<String>) -> Self {
        self.sub_dir = Some(sub_dir.into());
        self
    }

    /// Builder: Set the required filename ending
    pub fn with_ends_with(mut self, ends_with: impl Into<String>) -> Self {
        self.ends_with = ends_with.into();
        self
    }

    /// Builder: Set the output filename
    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = output.into();
        self
    }

    /// Full path of the collated output file
    pub fn output_path(&self) -> PathBuf {
        self.parent_dir.join(&self.output)
    }
}

/// Configuration for collecting GIF parcellation volumes
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct GifConfig {
    /// Directory searched recursively for `.xml` files
    pub in_dir: PathBuf,

    /// Output CSV path
    pub out_file: PathBuf,

    /// Volume measure to read for each region
    pub measure: GifMeasure,
}

impl GifConfig {
    /// Creates a config using the default `volumeProb` measure
    pub fn new(in_dir: impl Into<PathBuf>, out_file: impl Into<PathBuf>) -> Self {
        Self {
            in_dir: in_dir.into(),
            out_file: out_file.into(),
            measure: GifMeasure::default(),
        }
    }

    /// Builder: Set the volume measure
    pub fn with_measure(mut self, measure: GifMeasure) -> Self {
        self.measure = measure;
        self
    }
}
