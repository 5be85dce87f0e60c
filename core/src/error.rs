use thiserror::Error;

/// Result type for neurowrangle operations
pub type Result<T> = std::result::Result<T, NeuroWrangleError>;

/// Error types for neurowrangle operations
#[derive(Error, Debug)]
pub enum NeuroWrangleError {
    /// Mask builder was given no values to test
    #[error("Cannot build masks from an empty value sequence")]
    EmptyValues,

    /// A shell criterion matched no samples
    #[error(
        "Data not found for shell {shell} (criterion #{index}, tolerance {tolerance}); \
         shells without data: {missing:?}"
    )]
    NoDataForShell {
        index: usize,
        shell: f64,
        tolerance: f64,
        missing: Vec<f64>,
    },

    /// Some samples fall inside more than one shell window
    #[error(
        "Some volumes would be extracted twice! Check your b-values and tolerance for indices {indices:?}"
    )]
    OverlappingShells { indices: Vec<usize> },

    /// Lengths or shapes that must agree do not
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Malformed .bval / .bvec content
    #[error("Invalid gradient table: {0}")]
    InvalidGradientTable(String),

    /// NIfTI reading or writing error
    #[error("NIfTI error: {0}")]
    Nifti(String),

    /// CSV reading or writing error
    #[error("CSV error: {0}")]
    Csv(String),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// GIF parcellation content error
    #[error("GIF error: {0}")]
    Gif(String),

    /// Generic selection error
    #[error("Selection error: {0}")]
    Selection(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// Helper conversions
impl From<String> for NeuroWrangleError {
    fn from(s: String) -> Self {
        NeuroWrangleError::Selection(s)
    }
}

impl From<&str> for NeuroWrangleError {
    fn from(s: &str) -> Self {
        NeuroWrangleError::Selection(s.to_string())
    }
}

impl From<nifti::NiftiError> for NeuroWrangleError {
    fn from(e: nifti::NiftiError) -> Self {
        NeuroWrangleError::Nifti(format!("{}", e))
    }
}

impl From<csv::Error> for NeuroWrangleError {
    fn from(e: csv::Error) -> Self {
        NeuroWrangleError::Csv(format!("{}", e))
    }
}

impl From<roxmltree::Error> for NeuroWrangleError {
    fn from(e: roxmltree::Error) -> Self {
        NeuroWrangleError::Xml(format!("{}", e))
    }
}

impl From<walkdir::Error> for NeuroWrangleError {
    fn from(e: walkdir::Error) -> Self {
        NeuroWrangleError::Io(e.into())
    }
}
