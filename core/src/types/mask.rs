use super::ShellCriterion;

/// Boolean selection along the sample axis of a 4D volume
///
/// Length always equals the number of samples it was built for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleMask {
    selected: Vec<bool>,
}

impl SampleMask {
    /// Creates a new SampleMask
    pub fn new(selected: Vec<bool>) -> Self {
        Self { selected }
    }

    /// Number of samples covered by the mask
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Number of selected samples
    pub fn count(&self) -> usize {
        self.selected.iter().filter(|&&s| s).count()
    }

    /// Selected sample indices in ascending order
    pub fn indices(&self) -> Vec<usize> {
        self.selected
            .iter()
            .enumerate()
            .filter_map(|(i, &s)| s.then_some(i))
            .collect()
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.get(index).copied().unwrap_or(false)
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.selected
    }
}

/// Mask produced by a single shell criterion
#[derive(Debug, Clone, PartialEq)]
pub struct CriterionMask {
    pub criterion: ShellCriterion,
    pub selected: Vec<bool>,
}

impl CriterionMask {
    /// Creates a new CriterionMask
    pub fn new(criterion: ShellCriterion, selected: Vec<bool>) -> Self {
        Self {
            criterion,
            selected,
        }
    }

    /// Number of samples this criterion matched
    pub fn count(&self) -> usize {
        self.selected.iter().filter(|&&s| s).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_mask_indices() {
        let mask = SampleMask::new(vec![true, false, true, true, false]);
        assert_eq!(mask.len(), 5);
        assert_eq!(mask.count(), 3);
        assert_eq!(mask.indices(), vec![0, 2, 3]);
        assert!(mask.is_selected(2));
        assert!(!mask.is_selected(4));
        assert!(!mask.is_selected(99));
    }

    #[test]
    fn test_criterion_mask_count() {
        let mask = CriterionMask::new(ShellCriterion::exact(0.0), vec![true, false, true]);
        assert_eq!(mask.count(), 2);
    }
}
