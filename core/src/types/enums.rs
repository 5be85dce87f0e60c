use std::fmt;

/// Which GIF volume measure to collect from the parcellation XML
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "lowercase"))]
pub enum GifMeasure {
    /// Probabilistic volume (`volumeProb`)
    #[default]
    Prob,

    /// Categorical volume (`volumeCat`)
    Cat,
}

impl GifMeasure {
    /// XML element name holding this measure
    pub fn element_name(&self) -> &'static str {
        match self {
            GifMeasure::Prob => "volumeProb",
            GifMeasure::Cat => "volumeCat",
        }
    }

    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            GifMeasure::Prob => "prob",
            GifMeasure::Cat => "cat",
        }
    }
}

impl fmt::Display for GifMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}
