//! NIfTI volume loading and saving
//!
//! Outputs are always written with the header of the image they were derived
//! from, so orientation (qform/sform) and voxel sizes carry over unchanged.

use crate::error::{NeuroWrangleError, Result};
use log::debug;
use ndarray::{Array4, ArrayD, Ix4};
use nifti::writer::WriterOptions;
use nifti::{IntoNdArray, NiftiHeader, NiftiObject, ReaderOptions};
use std::path::Path;

/// A NIfTI image held in memory with the header it was read from
#[derive(Debug, Clone)]
pub struct NiftiImage<T> {
    pub header: NiftiHeader,
    pub data: T,
}

/// Diffusion series: three spatial axes plus one sample axis
pub type DwiImage = NiftiImage<Array4<f64>>;

/// Label or scalar volume of any dimensionality
pub type LabelImage = NiftiImage<ArrayD<f64>>;

/// Loads a NIfTI file (`.nii` or `.nii.gz`) as `f64`, applying scaling
pub fn load_volume<P: AsRef<Path>>(path: P) -> Result<LabelImage> {
    let path = path.as_ref();
    let obj = ReaderOptions::new().read_file(path)?;
    let header = obj.header().clone();
    let data = obj.into_volume().into_ndarray::<f64>()?;

    debug!("Loaded {} with shape {:?}", path.display(), data.shape());
    Ok(NiftiImage { header, data })
}

/// Loads a 4D diffusion-weighted series
///
/// # Errors
///
/// Returns `ShapeMismatch` if the image is not 4-dimensional
pub fn load_dwi<P: AsRef<Path>>(path: P) -> Result<DwiImage> {
    let path = path.as_ref();
    let image = load_volume(path)?;
    let ndim = image.data.ndim();

    let data = image.data.into_dimensionality::<Ix4>().map_err(|_| {
        NeuroWrangleError::ShapeMismatch(format!(
            "{} must be a 4D volume, got {}D",
            path.display(),
            ndim
        ))
    })?;

    Ok(NiftiImage {
        header: image.header,
        data,
    })
}

/// Writes a 4D float volume using `reference` for geometry
pub fn save_dwi<P: AsRef<Path>>(path: P, reference: &NiftiHeader, data: &Array4<f64>) -> Result<()> {
    WriterOptions::new(path.as_ref())
        .reference_header(reference)
        .write_nifti(data)?;
    Ok(())
}

/// Writes a 0/1 mask as `uint8` using `reference` for geometry
pub fn save_mask<P: AsRef<Path>>(path: P, reference: &NiftiHeader, data: &ArrayD<u8>) -> Result<()> {
    WriterOptions::new(path.as_ref())
        .reference_header(reference)
        .write_nifti(data)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;
    use tempfile::TempDir;

    fn write_float(path: &Path, data: &ArrayD<f64>) {
        WriterOptions::new(path).write_nifti(data).unwrap();
    }

    #[test]
    fn test_dwi_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dwi.nii.gz");
        let data = Array4::from_shape_fn((3, 2, 2, 4), |(x, _, _, t)| (x + 10 * t) as f64);
        write_float(&path, &data.clone().into_dyn());

        let image = load_dwi(&path).unwrap();
        assert_eq!(image.data.shape(), &[3, 2, 2, 4]);
        assert_eq!(image.data[[2, 1, 1, 3]], 32.0);

        let out = temp_dir.path().join("copy.nii");
        save_dwi(&out, &image.header, &image.data).unwrap();
        let reloaded = load_dwi(&out).unwrap();
        assert_eq!(reloaded.data, image.data);
    }

    #[test]
    fn test_load_dwi_rejects_3d() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("t1.nii");
        write_float(&path, &Array3::<f64>::zeros((2, 2, 2)).into_dyn());

        assert!(matches!(
            load_dwi(&path),
            Err(NeuroWrangleError::ShapeMismatch(_))
        ));
    }

    #[test]
    fn test_save_mask_reads_back() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("labels.nii");
        write_float(&src, &Array3::<f64>::zeros((2, 2, 2)).into_dyn());
        let reference = load_volume(&src).unwrap().header;

        let mut mask = ArrayD::<u8>::zeros(ndarray::IxDyn(&[2, 2, 2]));
        mask[[1, 0, 1]] = 1;
        let out = temp_dir.path().join("mask.nii.gz");
        save_mask(&out, &reference, &mask).unwrap();

        let reloaded = load_volume(&out).unwrap();
        assert_eq!(reloaded.data[[1, 0, 1]], 1.0);
        assert_eq!(reloaded.data.sum(), 1.0);
    }

    #[test]
    fn test_missing_file() {
        assert!(load_volume("/nonexistent/dwi.nii.gz").is_err());
    }
}
