//! Data-wrangling utilities for diffusion MRI pipelines
//!
//! - shell extraction: keep the volumes of a DWI series whose b-values fall
//!   within the requested shells, with matching bval/bvec files
//! - region combination: merge labels of a parcellation into one binary mask
//! - CSV concatenation and GIF volume collation for group-level tables
//!
//! # Example
//!
//! ```
//! use neurowrangle_core::{combine_shell_masks, shell_masks, ShellCriterion};
//!
//! let bvals = [0.0, 995.0, 2000.0, 1010.0];
//! let criteria = [ShellCriterion::new(0.0, 15.0), ShellCriterion::new(1000.0, 15.0)];
//!
//! let masks = shell_masks(&bvals, &criteria).unwrap();
//! let keep = combine_shell_masks(&masks).unwrap();
//!
//! assert_eq!(keep.indices(), vec![0, 1, 3]);
//! ```

pub mod api;
pub mod cli;
pub mod error;
pub mod io;
pub mod selection;
pub mod tabular;
pub mod types;

pub use api::{
    ExtractionSummary, RegionCombiner, RegionSummary, ShellCount, ShellExtractor, ShellOutputs,
    ShellSelection,
};
pub use cli::report::{ConsoleReporter, RegionReport, Reporter, TextReport};
pub use error::{NeuroWrangleError, Result};
pub use selection::{build_masks, combine_shell_masks, region_mask, shell_masks};
pub use tabular::{collect_gif_volumes, concat_csvs, CsvConcatSummary, GifSummary};
pub use types::*;
