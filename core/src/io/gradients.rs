//! FSL-style `.bval` / `.bvec` reading and writing
//!
//! `.bval`: b-values separated by whitespace (usually one line).
//! `.bvec`: three rows (x, y, z) with one column per volume; the transposed
//! layout with one row per volume is accepted as well.

use crate::error::{NeuroWrangleError, Result};
use crate::types::GradientTable;
use std::fs;
use std::path::Path;

/// Reads a b-value file and its matching gradient-direction file
pub fn read_bvals_bvecs<P: AsRef<Path>, Q: AsRef<Path>>(bval: P, bvec: Q) -> Result<GradientTable> {
    let bvals = parse_bvals(&fs::read_to_string(bval.as_ref())?)?;
    let bvecs = parse_bvecs(&fs::read_to_string(bvec.as_ref())?)?;

    if bvals.len() != bvecs.len() {
        return Err(NeuroWrangleError::InvalidGradientTable(format!(
            "{} has {} b-values but {} has {} directions",
            bval.as_ref().display(),
            bvals.len(),
            bvec.as_ref().display(),
            bvecs.len()
        )));
    }

    GradientTable::new(bvals, bvecs)
}

/// Parses b-values, flattening all rows
pub fn parse_bvals(text: &str) -> Result<Vec<f64>> {
    let values: Vec<f64> = parse_rows(text)?.into_iter().flatten().collect();
    if values.is_empty() {
        return Err(NeuroWrangleError::InvalidGradientTable(
            "b-value file contains no values".to_string(),
        ));
    }
    Ok(values)
}

/// Parses gradient directions into one `[x, y, z]` per volume
pub fn parse_bvecs(text: &str) -> Result<Vec<[f64; 3]>> {
    let mut rows = parse_rows(text)?;
    if rows.is_empty() {
        return Err(NeuroWrangleError::InvalidGradientTable(
            "b-vector file contains no values".to_string(),
        ));
    }

    let n_cols = rows[0].len();
    if rows.iter().any(|r| r.len() != n_cols) {
        return Err(NeuroWrangleError::InvalidGradientTable(
            "b-vector rows have different lengths".to_string(),
        ));
    }

    // FSL layout is 3 x N
    if rows.len() == 3 && n_cols != 3 {
        rows = (0..n_cols)
            .map(|c| rows.iter().map(|r| r[c]).collect())
            .collect();
    }

    rows.into_iter()
        .map(|r| {
            <[f64; 3]>::try_from(r.as_slice()).map_err(|_| {
                NeuroWrangleError::InvalidGradientTable(format!(
                    "b-vector file should have three rows, found a row with {} values",
                    r.len()
                ))
            })
        })
        .collect()
}

/// Writes b-values on one line, truncated to integers
pub fn write_bvals<P: AsRef<Path>>(path: P, bvals: &[f64]) -> Result<()> {
    let line: Vec<String> = bvals.iter().map(|b| (b.trunc() as i64).to_string()).collect();
    fs::write(path, format!("{}\n", line.join(" ")))?;
    Ok(())
}

/// Writes gradient directions as three rows (x, y, z)
pub fn write_bvecs<P: AsRef<Path>>(path: P, bvecs: &[[f64; 3]]) -> Result<()> {
    let mut out = String::new();
    for axis in 0..3 {
        let row: Vec<String> = bvecs.iter().map(|v| format!("{:.6}", v[axis])).collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    fs::write(path, out)?;
    Ok(())
}

fn parse_rows(text: &str) -> Result<Vec<Vec<f64>>> {
    text.lines()
        .enumerate()
        .map(|(n, line)| (n, line.split('#').next().unwrap_or("").trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(n, line)| {
            line.split_whitespace()
                .map(|tok| {
                    tok.parse::<f64>().map_err(|_| {
                        NeuroWrangleError::InvalidGradientTable(format!(
                            "line {}: '{}' is not a number",
                            n + 1,
                            tok
                        ))
                    })
                })
                .collect::<Result<Vec<f64>>>()
        })
        .collect()
}
