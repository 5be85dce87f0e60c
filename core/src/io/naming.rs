use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Splits a filename into stem and extension
///
/// Compound neuroimaging extensions such as `.nii.gz` are kept whole;
/// anything else falls back to the last `.` segment.
///
/// # Example
///
/// ```
/// use neurowrangle_core::io::split_extension;
///
/// assert_eq!(split_extension("sub-01_dwi.nii.gz"), ("sub-01_dwi", ".nii.gz"));
/// assert_eq!(split_extension("sub-01_dwi.bval"), ("sub-01_dwi", ".bval"));
/// assert_eq!(split_extension("notes"), ("notes", ""));
/// ```
pub fn split_extension(file_name: &str) -> (&str, &str) {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    let re = REGEX.get_or_init(|| {
        Regex::new(r"(?i)\.(nii\.gz|nii|hdr\.gz|hdr|bvals?|bvecs?|csv|txt)$")
            .expect("Failed to compile regex")
    });

    if let Some(m) = re.find(file_name) {
        if m.start() > 0 {
            return file_name.split_at(m.start());
        }
    }

    match file_name.rfind('.') {
        Some(idx) if idx > 0 => file_name.split_at(idx),
        _ => (file_name, ""),
    }
}

/// Inserts `_<suffix>` between the stem and extension of a filename
pub fn with_suffix(file_name: &str, suffix: &str) -> String {
    let (stem, ext) = split_extension(file_name);
    format!("{}_{}{}", stem, suffix, ext)
}

/// Derives an output path for `input` carrying `suffix`
///
/// The file lands in `out_dir` when given, otherwise next to `input`.
pub fn derived_output_path(input: &Path, suffix: &str, out_dir: Option<&Path>) -> PathBuf {
    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let dir = out_dir.map(Path::to_path_buf).unwrap_or_else(|| input_dir(input));
    dir.join(with_suffix(&file_name, suffix))
}

/// Directory containing `input` (empty for bare filenames)
pub fn input_dir(input: &Path) -> PathBuf {
    input
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("dwi.nii.gz", "dwi_b0_b1000.nii.gz")]
    #[case("dwi.NII.GZ", "dwi_b0_b1000.NII.GZ")]
    #[case("sub-01.run-1_dwi.nii", "sub-01.run-1_dwi_b0_b1000.nii")]
    #[case("dwi.bval", "dwi_b0_b1000.bval")]
    #[case("dwi.bvec", "dwi_b0_b1000.bvec")]
    #[case("dwi.bvals", "dwi_b0_b1000.bvals")]
    #[case("dwi.mif", "dwi_b0_b1000.mif")]
    #[case("dwi", "dwi_b0_b1000")]
    #[case(".hidden", ".hidden_b0_b1000")]
    fn test_with_suffix(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(with_suffix(input, "b0_b1000"), expected);
    }

    #[test]
    fn test_derived_path_next_to_input() {
        let path = derived_output_path(Path::new("/data/sub-01/dwi.nii.gz"), "b1000", None);
        assert_eq!(path, PathBuf::from("/data/sub-01/dwi_b1000.nii.gz"));
    }

    #[test]
    fn test_derived_path_in_out_dir() {
        let path = derived_output_path(
            Path::new("/data/sub-01/dwi.bval"),
            "b0_b2000",
            Some(Path::new("/derivatives")),
        );
        assert_eq!(path, PathBuf::from("/derivatives/dwi_b0_b2000.bval"));
    }

    #[test]
    fn test_derived_path_bare_filename() {
        let path = derived_output_path(Path::new("dwi.bvec"), "b0", None);
        assert_eq!(path, PathBuf::from("dwi_b0.bvec"));
    }
}
