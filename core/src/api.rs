use crate::cli::report::Reporter;
use crate::error::{NeuroWrangleError, Result};
use crate::io::{
    derived_output_path, load_dwi, load_volume, read_bvals_bvecs, save_dwi, save_mask,
    write_bvals, write_bvecs,
};
use crate::selection::{
    binary_mask_volume, combine_shell_masks, region_mask, select_samples, shell_masks,
    SAMPLE_AXIS,
};
use crate::types::{GradientTable, RegionConfig, RegionSet, SampleMask, ShellConfig, ShellCriterion};
use log::{info, warn};
use ndarray::{Array4, ArrayD, ArrayViewD};
use std::fs;
use std::path::{Path, PathBuf};

/// Extracts b-value shells from a diffusion series
///
/// The in-memory step ([`ShellExtractor::select`]) is separate from the
/// file pipeline ([`ShellExtractor::run`]) so the selection rules can be used
/// on data that did not come from disk.
///
/// # Example
///
/// ```
/// use neurowrangle_core::{GradientTable, ShellConfig, ShellExtractor};
/// use ndarray::Array4;
///
/// let volume = Array4::<f64>::zeros((2, 2, 2, 4));
/// let table = GradientTable::new(
///     vec![2.0, 1005.0, 1000.0, 500.0],
///     vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
/// )
/// .unwrap();
/// let config = ShellConfig::new(vec![0.0, 1000.0]).with_tolerance(15.0);
///
/// let selection = ShellExtractor::select(&volume, &table, &config).unwrap();
///
/// assert_eq!(selection.table.bvals(), &[2.0, 1005.0, 1000.0]);
/// assert_eq!(selection.volume.shape(), &[2, 2, 2, 3]);
/// ```
pub struct ShellExtractor;

impl ShellExtractor {
    /// Selects the volumes and gradient entries belonging to the configured shells
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No shells are configured
    /// - The volume and gradient table disagree on the number of samples
    /// - A shell has no data, or two shells claim the same volume
    pub fn select(
        volume: &Array4<f64>,
        table: &GradientTable,
        config: &ShellConfig,
    ) -> Result<ShellSelection> {
        let criteria = config.criteria();
        if criteria.is_empty() {
            return Err("No shells requested".into());
        }

        let n_samples = volume.len_of(SAMPLE_AXIS);
        if n_samples != table.len() {
            return Err(NeuroWrangleError::ShapeMismatch(format!(
                "DWI has {} volumes but {} b-values were read",
                n_samples,
                table.len()
            )));
        }

        let masks = shell_masks(table.bvals(), &criteria)?;
        let mask = combine_shell_masks(&masks)?;

        Ok(ShellSelection {
            volume: select_samples(volume, &mask)?,
            table: table.select(&mask)?,
            shell_counts: masks
                .iter()
                .map(|m| ShellCount {
                    criterion: m.criterion,
                    volumes: m.count(),
                })
                .collect(),
            mask,
        })
    }

    /// Runs the full pipeline: read inputs, select, write three outputs
    ///
    /// Nothing is written unless selection succeeds. If a later output fails
    /// to write, the outputs already written by this run are removed.
    pub fn run(
        dwi: &Path,
        bval: &Path,
        bvec: &Path,
        config: &ShellConfig,
        reporter: &mut dyn Reporter,
    ) -> Result<ExtractionSummary> {
        info!("Loading gradient table from {} and {}", bval.display(), bvec.display());
        let table = read_bvals_bvecs(bval, bvec)?;

        info!("Loading DWI {}", dwi.display());
        let image = load_dwi(dwi)?;

        let selection = Self::select(&image.data, &table, config)?;
        info!(
            "Keeping {} of {} volumes",
            selection.mask.count(),
            selection.mask.len()
        );

        if let Some(out_dir) = &config.out_dir {
            if !out_dir.exists() {
                fs::create_dir_all(out_dir)?;
                reporter.directory_created(out_dir);
            }
        }

        let suffix = config.shell_identifier();
        let out_dir = config.out_dir.as_deref();
        let outputs = ShellOutputs {
            dwi: derived_output_path(dwi, &suffix, out_dir),
            bval: derived_output_path(bval, &suffix, out_dir),
            bvec: derived_output_path(bvec, &suffix, out_dir),
        };

        save_dwi(&outputs.dwi, &image.header, &selection.volume)?;

        if let Err(e) = write_bvals(&outputs.bval, selection.table.bvals()) {
            remove_partial(&[outputs.dwi.as_path()]);
            return Err(e);
        }
        if let Err(e) = write_bvecs(&outputs.bvec, selection.table.bvecs()) {
            remove_partial(&[outputs.dwi.as_path(), outputs.bval.as_path()]);
            return Err(e);
        }

        reporter.file_written(&format!("DWI output with {} shells", suffix), &outputs.dwi);
        reporter.file_written(&format!("bvalues output with {} shells", suffix), &outputs.bval);
        reporter.file_written(&format!("bvector output with {} shells", suffix), &outputs.bvec);

        Ok(ExtractionSummary {
            shells: selection.shell_counts,
            input_volumes: selection.mask.len(),
            kept_indices: selection.mask.indices(),
            outputs,
        })
    }
}

/// Deletes outputs of a run that failed part-way
fn remove_partial(paths: &[&Path]) {
    for path in paths {
        match fs::remove_file(path) {
            Ok(()) => warn!("Removed partial output {}", path.display()),
            Err(e) => warn!("Could not remove partial output {}: {}", path.display(), e),
        }
    }
}

/// Result of an in-memory shell selection
#[derive(Debug, Clone)]
pub struct ShellSelection {
    /// Retained volumes, in original order
    pub volume: Array4<f64>,

    /// Retained b-values and directions, aligned with `volume`
    pub table: GradientTable,

    /// Combined mask over the input samples
    pub mask: SampleMask,

    /// Matches per requested shell
    pub shell_counts: Vec<ShellCount>,
}

/// Number of volumes matched by one shell
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ShellCount {
    pub criterion: ShellCriterion,
    pub volumes: usize,
}

/// Paths written by the shell extractor
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ShellOutputs {
    pub dwi: PathBuf,
    pub bval: PathBuf,
    pub bvec: PathBuf,
}

/// What a shell extraction run did
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ExtractionSummary {
    pub shells: Vec<ShellCount>,
    pub input_volumes: usize,
    pub kept_indices: Vec<usize>,
    pub outputs: ShellOutputs,
}

/// Combines labelled regions into one binary mask
pub struct RegionCombiner;

impl RegionCombiner {
    /// Builds a 0/1 mask marking voxels whose label is in `regions`
    ///
    /// # Errors
    ///
    /// Returns an error if no regions are given or the label volume is empty
    pub fn combine(labels: ArrayViewD<'_, f64>, regions: &RegionSet) -> Result<ArrayD<u8>> {
        if regions.is_empty() {
            return Err("No regions requested".into());
        }
        let mask = region_mask(labels, regions)?;
        Ok(binary_mask_volume(mask.view()))
    }

    /// Reads a label image, combines the configured regions and writes the mask
    pub fn run(
        input: &Path,
        config: &RegionConfig,
        reporter: &mut dyn Reporter,
    ) -> Result<RegionSummary> {
        info!("Loading label image {}", input.display());
        let image = load_volume(input)?;

        let mask = Self::combine(image.data.view(), &config.regions)?;
        let selected_voxels = mask.iter().filter(|&&v| v == 1).count();
        info!(
            "Regions {} cover {} of {} voxels",
            config.regions,
            selected_voxels,
            mask.len()
        );

        save_mask(&config.out_mask, &image.header, &mask)?;
        reporter.file_written("Combined mask", &config.out_mask);

        Ok(RegionSummary {
            regions: config.regions.labels().collect(),
            total_voxels: mask.len(),
            selected_voxels,
            out_mask: config.out_mask.clone(),
        })
    }
}

/// What a region combination run did
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct RegionSummary {
    pub regions: Vec<i64>,
    pub total_voxels: usize,
    pub selected_voxels: usize,
    pub out_mask: PathBuf,
}
