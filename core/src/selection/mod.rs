//! Selection logic shared by the shell extractor and the region combiner
//!
//! - [`masks`]: one boolean mask per criterion (shell window or label set)
//! - [`combine`]: coverage/exclusivity validation and union of shell masks
//! - [`apply`]: applying a final mask to volumes

mod apply;
mod combine;
mod masks;

pub use apply::{binary_mask_volume, select_samples, SAMPLE_AXIS};
pub use combine::combine_shell_masks;
pub use masks::{build_masks, region_mask, shell_masks};
