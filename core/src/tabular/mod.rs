//! Spreadsheet collation tools
//!
//! - [`concat`]: stack many result CSVs into one long table
//! - [`gif`]: collect GIF parcellation volumes from XML into one CSV

pub mod concat;
pub mod gif;

pub use concat::{collect_files, concat_csvs, CsvConcatSummary, FILENAME_COLUMN};
pub use gif::{collect_gif_volumes, parse_gif_xml, GifSummary};

use crate::error::Result;
use std::path::Path;

/// Writes `rows` under `header`, leaving cells without a value empty
///
/// Each row is a list of `(column index, value)` pairs.
pub(crate) fn write_table(path: &Path, header: &[String], rows: &[Vec<(usize, String)>]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(header)?;

    for row in rows {
        let mut record = vec![""; header.len()];
        for (idx, value) in row {
            record[*idx] = value.as_str();
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}
