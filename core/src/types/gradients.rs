use super::SampleMask;
use crate::error::{NeuroWrangleError, Result};

/// Per-sample diffusion encoding: one b-value and one gradient direction
///
/// Entry `i` describes volume `i` along the sample axis of the DWI.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientTable {
    bvals: Vec<f64>,
    bvecs: Vec<[f64; 3]>,
}

impl GradientTable {
    /// Creates a gradient table, checking that both vectors have one entry per sample
    ///
    /// # Errors
    ///
    /// Returns `InvalidGradientTable` if the lengths differ
    pub fn new(bvals: Vec<f64>, bvecs: Vec<[f64; 3]>) -> Result<Self> {
        if bvals.len() != bvecs.len() {
            return Err(NeuroWrangleError::InvalidGradientTable(format!(
                "{} b-values but {} gradient directions",
                bvals.len(),
                bvecs.len()
            )));
        }
        Ok(Self { bvals, bvecs })
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.bvals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bvals.is_empty()
    }

    pub fn bvals(&self) -> &[f64] {
        &self.bvals
    }

    pub fn bvecs(&self) -> &[[f64; 3]] {
        &self.bvecs
    }

    /// Keeps the entries selected by `mask`, preserving their order
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the mask was built for a different sample count
    pub fn select(&self, mask: &SampleMask) -> Result<GradientTable> {
        if mask.len() != self.len() {
            return Err(NeuroWrangleError::ShapeMismatch(format!(
                "mask covers {} samples, gradient table has {}",
                mask.len(),
                self.len()
            )));
        }

        let keep = mask.indices();
        Ok(GradientTable {
            bvals: keep.iter().map(|&i| self.bvals[i]).collect(),
            bvecs: keep.iter().map(|&i| self.bvecs[i]).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> GradientTable {
        GradientTable::new(
            vec![2.0, 1005.0, 1000.0, 500.0],
            vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [0.0, 0.0, 1.0],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let result = GradientTable::new(vec![0.0, 1000.0], vec![[0.0, 0.0, 0.0]]);
        assert!(matches!(
            result,
            Err(NeuroWrangleError::InvalidGradientTable(_))
        ));
    }

    #[test]
    fn test_select_preserves_correspondence() {
        let mask = SampleMask::new(vec![true, false, true, true]);
        let kept = table().select(&mask).unwrap();

        assert_eq!(kept.bvals(), &[2.0, 1000.0, 500.0]);
        assert_eq!(
            kept.bvecs(),
            &[[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]
        );
    }

    #[test]
    fn test_select_wrong_mask_length() {
        let mask = SampleMask::new(vec![true, false]);
        assert!(matches!(
            table().select(&mask),
            Err(NeuroWrangleError::ShapeMismatch(_))
        ));
    }
}
