use crate::api::{ExtractionSummary, RegionSummary};
use std::fmt;
use std::path::Path;
#[cfg(test)]
use std::path::PathBuf;

/// Sink for user-facing progress and confirmation messages
///
/// Pipelines never print directly; the binary decides where messages go.
pub trait Reporter {
    /// An output directory did not exist and was created
    fn directory_created(&mut self, path: &Path);

    /// An output file was written
    fn file_written(&mut self, description: &str, path: &Path);

    /// An input file was picked up while scanning a directory
    fn file_found(&mut self, _path: &Path) {}
}

/// Prints reports to stdout
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    /// Also print every input file found during directory scans
    pub list_inputs: bool,
}

impl ConsoleReporter {
    /// Creates a new ConsoleReporter
    pub fn new(list_inputs: bool) -> Self {
        Self { list_inputs }
    }
}

impl Reporter for ConsoleReporter {
    fn directory_created(&mut self, path: &Path) {
        println!("Creating new directory: {}", path.display());
    }

    fn file_written(&mut self, description: &str, path: &Path) {
        println!("{} saved: {}", description, path.display());
    }

    fn file_found(&mut self, path: &Path) {
        if self.list_inputs {
            println!("{}", path.display());
        }
    }
}

/// A single reported event
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    DirectoryCreated(PathBuf),
    FileWritten { description: String, path: PathBuf },
    FileFound(PathBuf),
}

/// Keeps reported events in memory
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub events: Vec<ReportEvent>,
}

#[cfg(test)]
impl Reporter for RecordingReporter {
    fn directory_created(&mut self, path: &Path) {
        self.events
            .push(ReportEvent::DirectoryCreated(path.to_path_buf()));
    }

    fn file_written(&mut self, description: &str, path: &Path) {
        self.events.push(ReportEvent::FileWritten {
            description: description.to_string(),
            path: path.to_path_buf(),
        });
    }

    fn file_found(&mut self, path: &Path) {
        self.events.push(ReportEvent::FileFound(path.to_path_buf()));
    }
}

/// Text report for a shell extraction run
pub struct TextReport<'a> {
    summary: &'a ExtractionSummary,
}

impl<'a> TextReport<'a> {
    /// Creates a new text report
    pub fn new(summary: &'a ExtractionSummary) -> Self {
        Self { summary }
    }
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Shell Extraction")?;
        writeln!(f, "================")?;
        writeln!(f)?;
        for shell in &self.summary.shells {
            writeln!(f, "{:<16}{} volumes", format!("{}:", shell.criterion), shell.volumes)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "Kept:           {} of {}",
            self.summary.kept_indices.len(),
            self.summary.input_volumes
        )?;
        writeln!(f, "Indices:        {:?}", self.summary.kept_indices)?;
        writeln!(f)?;
        writeln!(f, "Outputs")?;
        writeln!(f, "-------")?;
        writeln!(f, "DWI:            {}", self.summary.outputs.dwi.display())?;
        writeln!(f, "bval:           {}", self.summary.outputs.bval.display())?;
        writeln!(f, "bvec:           {}", self.summary.outputs.bvec.display())?;

        Ok(())
    }
}

/// Text report for a region combination run
pub struct RegionReport<'a> {
    summary: &'a RegionSummary,
}

impl<'a> RegionReport<'a> {
    /// Creates a new region report
    pub fn new(summary: &'a RegionSummary) -> Self {
        Self { summary }
    }
}

impl<'a> fmt::Display for RegionReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self.summary.regions.iter().map(|l| l.to_string()).collect();
        writeln!(f, "Region Mask")?;
        writeln!(f, "===========")?;
        writeln!(f)?;
        writeln!(f, "Labels:         {}", labels.join(" "))?;
        writeln!(
            f,
            "Voxels:         {} of {}",
            self.summary.selected_voxels, self.summary.total_voxels
        )?;
        writeln!(f, "Mask:           {}", self.summary.out_mask.display())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ShellCount, ShellOutputs};
    use crate::types::ShellCriterion;

    #[test]
    fn test_text_report_format() {
        let summary = ExtractionSummary {
            shells: vec![
                ShellCount {
                    criterion: ShellCriterion::new(0.0, 15.0),
                    volumes: 1,
                },
                ShellCount {
                    criterion: ShellCriterion::new(1000.0, 15.0),
                    volumes: 2,
                },
            ],
            input_volumes: 4,
            kept_indices: vec![0, 1, 2],
            outputs: ShellOutputs {
                dwi: PathBuf::from("out/dwi_b0_b1000.nii.gz"),
                bval: PathBuf::from("out/dwi_b0_b1000.bval"),
                bvec: PathBuf::from("out/dwi_b0_b1000.bvec"),
            },
        };

        let output = format!("{}", TextReport::new(&summary));

        assert!(output.contains("Shell Extraction"));
        assert!(output.contains("b0 +/- 15:      1 volumes"));
        assert!(output.contains("b1000 +/- 15:   2 volumes"));
        assert!(output.contains("Kept:           3 of 4"));
        assert!(output.contains("Indices:        [0, 1, 2]"));
        assert!(output.contains("DWI:            out/dwi_b0_b1000.nii.gz"));
    }

    #[test]
    fn test_region_report_format() {
        let summary = RegionSummary {
            regions: vec![1001, 1002],
            total_voxels: 100,
            selected_voxels: 12,
            out_mask: PathBuf::from("mask.nii.gz"),
        };

        let output = format!("{}", RegionReport::new(&summary));

        assert!(output.contains("Labels:         1001 1002"));
        assert!(output.contains("Voxels:         12 of 100"));
        assert!(output.contains("Mask:           mask.nii.gz"));
    }

    #[test]
    fn test_recording_reporter() {
        let mut reporter = RecordingReporter::default();
        reporter.directory_created(Path::new("out"));
        reporter.file_found(Path::new("a.csv"));
        reporter.file_written("Combined", Path::new("all.csv"));

        assert_eq!(reporter.events.len(), 3);
        assert_eq!(
            reporter.events[1],
            ReportEvent::FileFound(PathBuf::from("a.csv"))
        );
    }
}
