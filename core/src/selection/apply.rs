use crate::error::{NeuroWrangleError, Result};
use crate::types::SampleMask;
use ndarray::{Array4, ArrayD, ArrayViewD, Axis};

/// Sample axis of a 4D DWI volume
pub const SAMPLE_AXIS: Axis = Axis(3);

/// Keeps the volumes selected by `mask` along the sample axis
///
/// Retained volumes stay in their original order.
///
/// # Errors
///
/// Returns `ShapeMismatch` if the mask length differs from the number of volumes
pub fn select_samples(volume: &Array4<f64>, mask: &SampleMask) -> Result<Array4<f64>> {
    let n_samples = volume.len_of(SAMPLE_AXIS);
    if mask.len() != n_samples {
        return Err(NeuroWrangleError::ShapeMismatch(format!(
            "mask covers {} samples, volume has {}",
            mask.len(),
            n_samples
        )));
    }

    Ok(volume.select(SAMPLE_AXIS, &mask.indices()))
}

/// Converts a voxel selection into a 0/1 mask volume of identical shape
pub fn binary_mask_volume(mask: ArrayViewD<'_, bool>) -> ArrayD<u8> {
    mask.mapv(u8::from)
}
