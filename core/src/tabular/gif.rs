//! GIF parcellation XML reader
//!
//! Each GIF output XML holds per-region volumes:
//!
//! ```xml
//! <document>
//!   <labels>
//!     <item><number>24</number><name>Right Accumbens Area</name>
//!       <volumeProb>512.3</volumeProb><volumeCat>498</volumeCat></item>
//!   </labels>
//!   <tissues>
//!     <item><number>1</number><name>Non-Brain Outer Tissue</name>...</item>
//!     <item><number>2</number><name>Cerebral Spinal Fluid</name>...</item>
//!   </tissues>
//! </document>
//! ```
//!
//! The first tissue (non-brain outer tissue) shares its number with a label
//! and is skipped.

use super::collect_files;
use super::write_table;
use crate::cli::report::Reporter;
use crate::error::{NeuroWrangleError, Result};
use crate::types::{GifConfig, GifMeasure};
use log::{debug, info, warn};
use roxmltree::{Document, Node};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Regional volumes read from one GIF XML file
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GifRecord {
    /// XML file name
    pub xml: String,

    /// Full path of the XML file
    pub filename: PathBuf,

    /// `("<number> - <name>", volume)` in document order
    pub volumes: Vec<(String, String)>,
}

impl GifRecord {
    /// Column/value pairs as written to the spreadsheet
    fn cells(&self) -> Vec<(String, String)> {
        let mut cells = vec![
            ("XML".to_string(), self.xml.clone()),
            ("Filename".to_string(), self.filename.display().to_string()),
        ];
        cells.extend(self.volumes.iter().cloned());
        cells
    }
}

/// What a GIF collation run did
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct GifSummary {
    pub files: Vec<PathBuf>,
    pub regions: usize,
    pub measure: GifMeasure,
    pub output: PathBuf,
}

/// Parses the region volumes of one GIF XML document
///
/// # Errors
///
/// Returns an error if the XML is malformed, has no `labels` element, or an
/// item lacks `number`, `name` or the requested measure
pub fn parse_gif_xml(text: &str, measure: GifMeasure) -> Result<Vec<(String, String)>> {
    let doc = Document::parse(text)?;
    let root = doc.root_element();

    let labels = child(root, "labels")
        .ok_or_else(|| NeuroWrangleError::Gif("missing <labels> element".to_string()))?;
    let mut entries: Vec<Node> = items(labels).collect();

    match child(root, "tissues") {
        Some(tissues) => entries.extend(items(tissues).skip(1)),
        None => warn!("No <tissues> element; only labels collected"),
    }

    entries
        .into_iter()
        .map(|item| {
            let number = text_of(item, "number")?;
            let name = text_of(item, "name")?;
            let volume = text_of(item, measure.element_name())?;
            Ok((format!("{} - {}", number, name), volume))
        })
        .collect()
}

/// Reads every GIF XML under `in_dir` and writes one row per file
///
/// The header comes from the first file; regions missing from later files
/// are left empty.
///
/// # Errors
///
/// Returns an error if no XML files are found, any file fails to parse, or a
/// later file has a region the first file lacks
pub fn collect_gif_volumes(config: &GifConfig, reporter: &mut dyn Reporter) -> Result<GifSummary> {
    info!(
        "Collecting GIF {} volumes from {}",
        config.measure.element_name(),
        config.in_dir.display()
    );

    let files = collect_files(&config.in_dir, None, ".xml", None)?;
    if files.is_empty() {
        return Err(NeuroWrangleError::Gif(format!(
            "No .xml files found under {}",
            config.in_dir.display()
        )));
    }

    let mut records = Vec::with_capacity(files.len());
    for file in &files {
        reporter.file_found(file);
        records.push(read_record(file, config.measure)?);
    }

    let header: Vec<String> = records[0].cells().into_iter().map(|(k, _)| k).collect();
    let column_index: HashMap<&str, usize> = header
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    let mut rows = Vec::with_capacity(records.len());
    for record in &records {
        let row = record
            .cells()
            .into_iter()
            .map(|(column, value)| match column_index.get(column.as_str()) {
                Some(&idx) => Ok((idx, value)),
                None => Err(NeuroWrangleError::Gif(format!(
                    "{} has region '{}' not present in {}",
                    record.xml, column, records[0].xml
                ))),
            })
            .collect::<Result<Vec<_>>>()?;
        rows.push(row);
    }

    write_table(&config.out_file, &header, &rows)?;
    reporter.file_written("GIF volumes", &config.out_file);

    Ok(GifSummary {
        files,
        regions: header.len() - 2,
        measure: config.measure,
        output: config.out_file.clone(),
    })
}

fn read_record(path: &Path, measure: GifMeasure) -> Result<GifRecord> {
    let text = fs::read_to_string(path)?;
    let volumes = parse_gif_xml(&text, measure)
        .map_err(|e| NeuroWrangleError::Gif(format!("{}: {}", path.display(), e)))?;
    debug!("{}: {} regions", path.display(), volumes.len());

    Ok(GifRecord {
        xml: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        filename: path.to_path_buf(),
        volumes,
    })
}

fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(tag))
}

fn items<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|n| n.has_tag_name("item"))
}

fn text_of(item: Node, tag: &str) -> Result<String> {
    child(item, tag)
        .map(|n| n.text().unwrap_or("").trim().to_string())
        .ok_or_else(|| NeuroWrangleError::Gif(format!("item without <{}>", tag)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::report::{RecordingReporter, ReportEvent};
    use tempfile::TempDir;

    fn gif_xml(label_volume: &str) -> String {
        format!(
            r#"<?xml version="1.0"?>
<document>
  <labels>
    <item><number>24</number><name>Right Accumbens Area</name>
      <volumeProb>{label_volume}</volumeProb><volumeCat>498</volumeCat></item>
    <item><number>31</number><name>Left Amygdala</name>
      <volumeProb>1200.5</volumeProb><volumeCat>1190</volumeCat></item>
  </labels>
  <tissues>
    <item><number>1</number><name>Non-Brain Outer Tissue</name>
      <volumeProb>9999</volumeProb><volumeCat>9998</volumeCat></item>
    <item><number>2</number><name>Cerebral Spinal Fluid</name>
      <volumeProb>300</volumeProb><volumeCat>290</volumeCat></item>
  </tissues>
</document>"#
        )
    }

    #[test]
    fn test_parse_prob() {
        let volumes = parse_gif_xml(&gif_xml("512.3"), GifMeasure::Prob).unwrap();
        assert_eq!(
            volumes,
            vec![
                ("24 - Right Accumbens Area".to_string(), "512.3".to_string()),
                ("31 - Left Amygdala".to_string(), "1200.5".to_string()),
                ("2 - Cerebral Spinal Fluid".to_string(), "300".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_cat() {
        let volumes = parse_gif_xml(&gif_xml("512.3"), GifMeasure::Cat).unwrap();
        assert_eq!(volumes[0].1, "498");
        assert_eq!(volumes[2].1, "290");
    }

    #[test]
    fn test_parse_missing_labels() {
        let result = parse_gif_xml("<document><tissues/></document>", GifMeasure::Prob);
        assert!(matches!(result, Err(NeuroWrangleError::Gif(_))));
    }

    #[test]
    fn test_parse_missing_measure() {
        let xml = "<document><labels><item><number>1</number><name>A</name></item></labels></document>";
        assert!(parse_gif_xml(xml, GifMeasure::Prob).is_err());
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(
            parse_gif_xml("<document><labels>", GifMeasure::Prob),
            Err(NeuroWrangleError::Xml(_))
        ));
    }

    #[test]
    fn test_collect_writes_one_row_per_file() {
        let temp_dir = TempDir::new().unwrap();
        let in_dir = temp_dir.path().join("gif");
        fs::create_dir_all(in_dir.join("sub-02")).unwrap();
        fs::write(in_dir.join("sub-01.xml"), gif_xml("500")).unwrap();
        fs::write(in_dir.join("sub-02/sub-02.xml"), gif_xml("600")).unwrap();
        fs::write(in_dir.join("readme.txt"), "ignore").unwrap();

        let out_file = temp_dir.path().join("volumes.csv");
        let config = GifConfig::new(&in_dir, &out_file);
        let mut reporter = RecordingReporter::default();

        let summary = collect_gif_volumes(&config, &mut reporter).unwrap();

        assert_eq!(summary.files.len(), 2);
        assert_eq!(summary.regions, 3);

        let mut reader = csv::Reader::from_path(&out_file).unwrap();
        let header: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(
            header,
            vec![
                "XML",
                "Filename",
                "24 - Right Accumbens Area",
                "31 - Left Amygdala",
                "2 - Cerebral Spinal Fluid"
            ]
        );
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "sub-01.xml");
        assert_eq!(&rows[0][2], "500");
        assert_eq!(&rows[1][0], "sub-02.xml");
        assert_eq!(&rows[1][2], "600");

        assert_eq!(
            reporter.events.last(),
            Some(&ReportEvent::FileWritten {
                description: "GIF volumes".to_string(),
                path: out_file.clone(),
            })
        );
    }

    #[test]
    fn test_collect_rejects_unknown_region() {
        let temp_dir = TempDir::new().unwrap();
        let in_dir = temp_dir.path();
        fs::write(
            in_dir.join("a.xml"),
            "<document><labels><item><number>1</number><name>A</name><volumeProb>1</volumeProb></item></labels></document>",
        )
        .unwrap();
        fs::write(
            in_dir.join("b.xml"),
            "<document><labels><item><number>2</number><name>B</name><volumeProb>2</volumeProb></item></labels></document>",
        )
        .unwrap();

        let config = GifConfig::new(in_dir, temp_dir.path().join("out.csv"));
        assert!(matches!(
            collect_gif_volumes(&config, &mut RecordingReporter::default()),
            Err(NeuroWrangleError::Gif(_))
        ));
    }

    #[test]
    fn test_collect_leaves_missing_region_empty() {
        let temp_dir = TempDir::new().unwrap();
        let in_dir = temp_dir.path().join("gif");
        fs::create_dir_all(&in_dir).unwrap();
        fs::write(in_dir.join("a.xml"), gif_xml("500")).unwrap();
        fs::write(
            in_dir.join("b.xml"),
            "<document><labels>\
             <item><number>24</number><name>Right Accumbens Area</name><volumeProb>610</volumeProb></item>\
             </labels></document>",
        )
        .unwrap();

        let out_file = temp_dir.path().join("volumes.csv");
        let config = GifConfig::new(&in_dir, &out_file);
        let summary = collect_gif_volumes(&config, &mut RecordingReporter::default()).unwrap();
        assert_eq!(summary.regions, 3);

        let mut reader = csv::Reader::from_path(&out_file).unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][0], "b.xml");
        assert_eq!(&rows[1][2], "610");
        assert_eq!(&rows[1][3], "");
        assert_eq!(&rows[1][4], "");
    }

    #[test]
    fn test_collect_no_xml() {
        let temp_dir = TempDir::new().unwrap();
        let config = GifConfig::new(temp_dir.path(), temp_dir.path().join("out.csv"));
        assert!(collect_gif_volumes(&config, &mut RecordingReporter::default()).is_err());
    }
}
