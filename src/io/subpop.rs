//! # Subpopulation File Reading
//!
//! One integer genotype-vector index per line. Lines are trimmed and blank
//! lines are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::data::sample_mask::SampleMask;
use crate::error::{McorrError, Result};

/// Load a subpopulation mask from `path`
pub fn read_sample_mask(path: &Path) -> Result<SampleMask> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => McorrError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => McorrError::Io(e),
    })?;
    let mask = parse_sample_mask(BufReader::new(file))?;
    debug!(path = ?path, n_indices = mask.len(), "loaded subpopulation mask");
    Ok(mask)
}

/// Parse mask indices from any line source
pub fn parse_sample_mask<R: BufRead>(reader: R) -> Result<SampleMask> {
    let mut indices = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let idx: usize = trimmed.parse().map_err(|_| {
            McorrError::parse(i + 1, format!("Invalid sample index '{}'", trimmed))
        })?;
        indices.push(idx);
    }
    Ok(SampleMask::new(indices))
}
