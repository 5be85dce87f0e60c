use crate::error::{NeuroWrangleError, Result};
use crate::types::{CriterionMask, SampleMask};
use log::{debug, warn};

/// Validates per-shell masks and merges them into one sample mask
///
/// Two checks run before anything is combined:
/// 1. Coverage: every shell must match at least one sample.
/// 2. Exclusivity: no sample may be matched by more than one shell.
///
/// The result is the element-wise OR of all masks.
///
/// # Errors
///
/// - `NoDataForShell` naming the first shell without data (all empty shells
///   are listed in `missing`)
/// - `OverlappingShells` listing every sample matched more than once
/// - `ShapeMismatch` if the masks have different lengths
/// - `EmptyValues` if no masks are given
pub fn combine_shell_masks(masks: &[CriterionMask]) -> Result<SampleMask> {
    let first = masks.first().ok_or(NeuroWrangleError::EmptyValues)?;
    let n_samples = first.selected.len();

    if let Some(bad) = masks.iter().find(|m| m.selected.len() != n_samples) {
        return Err(NeuroWrangleError::ShapeMismatch(format!(
            "mask for {} covers {} samples, expected {}",
            bad.criterion,
            bad.selected.len(),
            n_samples
        )));
    }

    check_coverage(masks)?;

    let mut hits = vec![0usize; n_samples];
    for mask in masks {
        for (count, &selected) in hits.iter_mut().zip(&mask.selected) {
            if selected {
                *count += 1;
            }
        }
    }

    let overlapping: Vec<usize> = hits
        .iter()
        .enumerate()
        .filter_map(|(i, &count)| (count > 1).then_some(i))
        .collect();
    if !overlapping.is_empty() {
        warn!("Volumes selected by more than one shell: {:?}", overlapping);
        return Err(NeuroWrangleError::OverlappingShells {
            indices: overlapping,
        });
    }

    let combined = SampleMask::new(hits.into_iter().map(|count| count == 1).collect());
    debug!(
        "Combined mask keeps {} of {} volumes",
        combined.count(),
        combined.len()
    );
    Ok(combined)
}

fn check_coverage(masks: &[CriterionMask]) -> Result<()> {
    let missing: Vec<(usize, &CriterionMask)> = masks
        .iter()
        .enumerate()
        .filter(|(_, m)| m.count() == 0)
        .collect();

    match missing.first() {
        None => Ok(()),
        Some(&(index, mask)) => Err(NeuroWrangleError::NoDataForShell {
            index,
            shell: mask.criterion.shell,
            tolerance: mask.criterion.tolerance,
            missing: missing.iter().map(|(_, m)| m.criterion.shell).collect(),
        }),
    }
}
