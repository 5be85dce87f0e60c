pub mod gradients;
pub mod naming;
pub mod nifti;

pub use self::gradients::{parse_bvals, parse_bvecs, read_bvals_bvecs, write_bvals, write_bvecs};
pub use self::naming::{derived_output_path, input_dir, split_extension, with_suffix};
pub use self::nifti::{
    load_dwi, load_volume, save_dwi, save_mask, DwiImage, LabelImage, NiftiImage,
};
