use std::collections::BTreeSet;
use std::fmt;

/// A rule deciding whether a single scalar value is selected
///
/// Implemented by [`ShellCriterion`] (range test) and [`RegionSet`]
/// (membership test) so both can share the same mask builder.
pub trait Criterion {
    /// Returns `true` if `value` satisfies this criterion
    fn matches(&self, value: f64) -> bool;
}

/// Nominal b-value shell with a symmetric tolerance window
///
/// A sample belongs to the shell when
/// `shell - tolerance <= bval <= shell + tolerance`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ShellCriterion {
    pub shell: f64,
    pub tolerance: f64,
}

impl ShellCriterion {
    /// Creates a new ShellCriterion
    pub fn new(shell: f64, tolerance: f64) -> Self {
        Self { shell, tolerance }
    }

    /// Creates a criterion that only matches the exact shell value
    pub fn exact(shell: f64) -> Self {
        Self::new(shell, 0.0)
    }

    /// Lower and upper bound of the window (inclusive)
    pub fn window(&self) -> (f64, f64) {
        (self.shell - self.tolerance, self.shell + self.tolerance)
    }

    /// Identifier used in output filenames, e.g. `b1000`
    pub fn identifier(&self) -> String {
        format!("b{}", self.shell)
    }
}

impl Criterion for ShellCriterion {
    fn matches(&self, value: f64) -> bool {
        let (lo, hi) = self.window();
        value >= lo && value <= hi
    }
}

impl fmt::Display for ShellCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tolerance == 0.0 {
            write!(f, "{}", self.identifier())
        } else {
            write!(f, "{} +/- {}", self.identifier(), self.tolerance)
        }
    }
}

/// Set of integer label ids that together form one region
///
/// Supplied order is irrelevant; the set is kept sorted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct RegionSet {
    labels: BTreeSet<i64>,
}

impl RegionSet {
    /// Creates an empty RegionSet
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct labels
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Checks if an integer label is part of the region
    pub fn contains(&self, label: i64) -> bool {
        self.labels.contains(&label)
    }

    /// Sorted label ids
    pub fn labels(&self) -> impl Iterator<Item = i64> + '_ {
        self.labels.iter().copied()
    }
}

impl Criterion for RegionSet {
    /// Voxel values are stored as floats; only integral values can match.
    fn matches(&self, value: f64) -> bool {
        value.fract() == 0.0 && self.contains(value as i64)
    }
}

impl FromIterator<i64> for RegionSet {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for RegionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self.labels.iter().map(|l| l.to_string()).collect();
        write!(f, "{{{}}}", labels.join(", "))
    }
}
