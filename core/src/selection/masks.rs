use crate::error::{NeuroWrangleError, Result};
use crate::types::{Criterion, CriterionMask, RegionSet, ShellCriterion};
use log::debug;
use ndarray::{ArrayD, ArrayViewD};

/// Builds one boolean mask per criterion over a sequence of values
///
/// `masks[c][i]` is `true` iff `criteria[c]` matches `values[i]`.
/// Masks come back in the same order as `criteria`.
///
/// # Errors
///
/// Returns `EmptyValues` if `values` is empty
pub fn build_masks<C: Criterion>(values: &[f64], criteria: &[C]) -> Result<Vec<Vec<bool>>> {
    if values.is_empty() {
        return Err(NeuroWrangleError::EmptyValues);
    }

    Ok(criteria
        .iter()
        .map(|criterion| values.iter().map(|&v| criterion.matches(v)).collect())
        .collect())
}

/// Builds a mask per shell over the b-values of each sample
///
/// # Example
///
/// ```
/// use neurowrangle_core::{shell_masks, ShellCriterion};
///
/// let bvals = [2.0, 1005.0, 1000.0, 500.0];
/// let criteria = [ShellCriterion::new(0.0, 15.0), ShellCriterion::new(1000.0, 15.0)];
/// let masks = shell_masks(&bvals, &criteria).unwrap();
///
/// assert_eq!(masks[0].selected, vec![true, false, false, false]);
/// assert_eq!(masks[1].selected, vec![false, true, true, false]);
/// ```
pub fn shell_masks(bvals: &[f64], criteria: &[ShellCriterion]) -> Result<Vec<CriterionMask>> {
    let masks = build_masks(bvals, criteria)?;

    Ok(criteria
        .iter()
        .zip(masks)
        .map(|(criterion, selected)| {
            let mask = CriterionMask::new(*criterion, selected);
            debug!("Shell {} matched {} volumes", criterion, mask.count());
            mask
        })
        .collect())
}

/// Marks every voxel whose label belongs to `regions`
///
/// The result has the same shape as `labels`.
///
/// # Errors
///
/// Returns `EmptyValues` if the label volume has no voxels
pub fn region_mask(labels: ArrayViewD<'_, f64>, regions: &RegionSet) -> Result<ArrayD<bool>> {
    if labels.is_empty() {
        return Err(NeuroWrangleError::EmptyValues);
    }

    let mask = labels.mapv(|v| regions.matches(v));
    debug!(
        "Regions {} cover {} voxels",
        regions,
        mask.iter().filter(|&&m| m).count()
    );
    Ok(mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array3, IxDyn};

    #[test]
    fn test_build_masks_empty_values() {
        let criteria = [ShellCriterion::exact(0.0)];
        assert!(matches!(
            build_masks(&[], &criteria),
            Err(NeuroWrangleError::EmptyValues)
        ));
    }

    #[test]
    fn test_build_masks_no_criteria() {
        let masks = build_masks::<ShellCriterion>(&[0.0, 1000.0], &[]).unwrap();
        assert!(masks.is_empty());
    }

    #[test]
    fn test_shell_masks_scenario() {
        let bvals = [2.0, 1005.0, 1000.0, 500.0];
        let criteria = [
            ShellCriterion::new(0.0, 15.0),
            ShellCriterion::new(1000.0, 15.0),
        ];
        let masks = shell_masks(&bvals, &criteria).unwrap();

        assert_eq!(masks.len(), 2);
        assert_eq!(masks[0].criterion.shell, 0.0);
        assert_eq!(masks[0].count(), 1);
        assert_eq!(masks[1].count(), 2);
    }

    #[test]
    fn test_shell_masks_exact_by_default() {
        let bvals = [0.0, 5.0, 1000.0, 995.0];
        let criteria = [ShellCriterion::exact(0.0), ShellCriterion::exact(1000.0)];
        let masks = shell_masks(&bvals, &criteria).unwrap();

        assert_eq!(masks[0].selected, vec![true, false, false, false]);
        assert_eq!(masks[1].selected, vec![false, false, true, false]);
    }

    #[test]
    fn test_build_masks_with_regions() {
        let regions: RegionSet = vec![2, 3].into_iter().collect();
        let masks = build_masks(&[1.0, 2.0, 3.0, 4.0], &[regions]).unwrap();
        assert_eq!(masks[0], vec![false, true, true, false]);
    }

    #[test]
    fn test_region_mask_shape_and_membership() {
        let labels = Array3::from_shape_fn((3, 2, 2), |(x, y, z)| {
            [0.0, 1001.0, 1002.0, 1003.0, 2000.0][(x + y + z) % 5]
        })
        .into_dyn();
        let regions: RegionSet = vec![1003, 1001, 1002].into_iter().collect();

        let mask = region_mask(labels.view(), &regions).unwrap();

        assert_eq!(mask.shape(), labels.shape());
        for (label, selected) in labels.iter().zip(mask.iter()) {
            let expected = *label == 1001.0 || *label == 1002.0 || *label == 1003.0;
            assert_eq!(*selected, expected);
        }
    }

    #[test]
    fn test_region_mask_empty_volume() {
        let labels = ArrayD::<f64>::zeros(IxDyn(&[0, 4, 4]));
        let regions: RegionSet = vec![1].into_iter().collect();
        assert!(matches!(
            region_mask(labels.view(), &regions),
            Err(NeuroWrangleError::EmptyValues)
        ));
    }
}
