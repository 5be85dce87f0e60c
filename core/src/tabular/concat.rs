use super::write_table;
use crate::cli::report::Reporter;
use crate::error::{NeuroWrangleError, Result};
use crate::types::CsvConcatConfig;
use log::{info, warn};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Column holding the source path of every row
pub const FILENAME_COLUMN: &str = "Filename";

/// What a CSV concatenation run did
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct CsvConcatSummary {
    pub files: Vec<PathBuf>,
    pub columns: Vec<String>,
    pub rows: usize,
    pub output: PathBuf,
}

/// Finds files under `root` whose name ends with `ends_with`
///
/// Traversal is sorted by file name. When `sub_dir` is given, only files
/// whose parent directory path contains it are returned. `exclude` is never
/// returned.
pub fn collect_files(
    root: &Path,
    sub_dir: Option<&str>,
    ends_with: &str,
    exclude: Option<&Path>,
) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if let Some(sub_dir) = sub_dir {
            let parent = path.parent().map(|p| p.to_string_lossy().into_owned());
            if !parent.is_some_and(|p| p.contains(sub_dir)) {
                continue;
            }
        }

        if !entry.file_name().to_string_lossy().ends_with(ends_with) {
            continue;
        }

        if exclude == Some(path) {
            continue;
        }

        files.push(path.to_path_buf());
    }

    Ok(files)
}

/// Concatenates every matching CSV under `parent_dir` into one file
///
/// Columns are the union of all input headers in first-seen order, followed
/// by `Filename` (unless an input already has it). Cells missing from an
/// input are left empty.
///
/// # Errors
///
/// Returns an error if no files match or any CSV cannot be read
pub fn concat_csvs(config: &CsvConcatConfig, reporter: &mut dyn Reporter) -> Result<CsvConcatSummary> {
    let root = fs::canonicalize(&config.parent_dir)?;
    let output = root.join(&config.output);

    match &config.sub_dir {
        Some(sub_dir) => info!(
            "Subdirectory defined - only collecting csv files under: {}",
            sub_dir
        ),
        None => info!("Collecting all csv files under {}", root.display()),
    }

    let files = collect_files(
        &root,
        config.sub_dir.as_deref(),
        &config.ends_with,
        Some(&output),
    )?;
    if files.is_empty() {
        return Err(NeuroWrangleError::Csv(format!(
            "No files ending with '{}' found under {}",
            config.ends_with,
            root.display()
        )));
    }

    let mut columns: Vec<String> = Vec::new();
    let mut column_index: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<Vec<(usize, String)>> = Vec::new();

    let mut column_for = |name: &str, columns: &mut Vec<String>| -> usize {
        *column_index.entry(name.to_string()).or_insert_with(|| {
            columns.push(name.to_string());
            columns.len() - 1
        })
    };

    for file in &files {
        reporter.file_found(file);

        let mut reader = csv::Reader::from_path(file)?;
        let header_idx: Vec<usize> = reader
            .headers()?
            .iter()
            .map(|h| column_for(h, &mut columns))
            .collect();
        let filename_idx = column_for(FILENAME_COLUMN, &mut columns);
        let source = file.display().to_string();

        let before = rows.len();
        for record in reader.records() {
            let record = record?;
            let mut row: Vec<(usize, String)> = header_idx
                .iter()
                .zip(record.iter())
                .filter(|(&idx, _)| idx != filename_idx)
                .map(|(&idx, value)| (idx, value.to_string()))
                .collect();
            row.push((filename_idx, source.clone()));
            rows.push(row);
        }

        if rows.len() == before {
            warn!("{} has no data rows", file.display());
        }
    }

    write_table(&output, &columns, &rows)?;
    reporter.file_written("Concatenated csv", &output);

    Ok(CsvConcatSummary {
        files,
        columns,
        rows: rows.len(),
        output,
    })
}
