//! Core type definitions for neuroimaging data wrangling
//!
//! This module provides the fundamental types used throughout the neurowrangle library:
//! - [`Criterion`]: Selection rule shared by shells and regions
//! - [`ShellCriterion`]: Nominal b-value with tolerance window
//! - [`RegionSet`]: Set of integer label ids forming one region
//! - [`SampleMask`] / [`CriterionMask`]: Boolean selections along the sample axis
//! - [`GradientTable`]: Paired b-values and gradient directions
//! - [`ShellConfig`], [`RegionConfig`], [`CsvConcatConfig`], [`GifConfig`]: Tool configuration
//! - [`GifMeasure`]: Which GIF volume measure to collect

mod config;
mod criteria;
mod enums;
mod gradients;
mod mask;

pub use config::{CsvConcatConfig, GifConfig, RegionConfig, ShellConfig};
pub use criteria::{Criterion, RegionSet, ShellCriterion};
pub use enums::GifMeasure;
pub use gradients::GradientTable;
pub use mask::{CriterionMask, SampleMask};
