//! # VCF Record Reading
//!
//! Line-oriented VCF reader yielding biallelic SNP records with decoded
//! genotype codes. Plain text and BGZF (`.gz`/`.bgz`) inputs are supported;
//! compressed input is decoded with `noodles-bgzf`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use noodles_bgzf::io as bgzf_io;
use tracing::info_span;

use crate::data::genotype::decode_genotype;
use crate::data::record::{is_snv, VariantRecord};
use crate::error::{McorrError, Result};

/// FORMAT key holding the genotype call
pub const GT_KEY: &str = "GT";

/// First column that may hold FORMAT (CHROM POS ID REF ALT precede it)
const FIRST_OPTIONAL_COLUMN: usize = 5;

/// Streaming VCF reader over decoded SNP records
pub struct VcfRecordReader {
    reader: Box<dyn BufRead + Send>,
    line_buf: String,
    line_num: usize,
    /// Set after EOF or the first error; the iterator is fused from then on
    done: bool,
}

impl VcfRecordReader {
    /// Open a VCF file, decompressing BGZF when the extension says so
    pub fn open(path: &Path) -> Result<Self> {
        info_span!("vcf_open", path = ?path).in_scope(|| {
            let file = File::open(path).map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => McorrError::FileNotFound {
                    path: path.to_path_buf(),
                },
                _ => McorrError::Io(e),
            })?;

            let is_gzipped = path
                .extension()
                .map(|e| e == "gz" || e == "bgz")
                .unwrap_or(false);

            let reader: Box<dyn BufRead + Send> = if is_gzipped {
                Box::new(BufReader::new(bgzf_io::Reader::new(file)))
            } else {
                Box::new(BufReader::new(file))
            };

            Ok(Self::from_reader(reader))
        })
    }

    /// Create from a reader
    pub fn from_reader(reader: Box<dyn BufRead + Send>) -> Self {
        Self {
            reader,
            line_buf: String::new(),
            line_num: 0,
            done: false,
        }
    }

    /// Lines consumed so far, headers included
    pub fn line_num(&self) -> usize {
        self.line_num
    }

    /// Read lines until the next qualifying record, EOF, or an error.
    pub fn read_record(&mut self) -> Result<Option<VariantRecord>> {
        loop {
            self.line_buf.clear();
            let bytes_read = self.reader.read_line(&mut self.line_buf)?;
            if bytes_read == 0 {
                return Ok(None);
            }
            self.line_num += 1;

            let line = self.line_buf.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(record) = parse_record(line, self.line_num)? {
                return Ok(Some(record));
            }
        }
    }
}

impl Iterator for VcfRecordReader {
    type Item = Result<VariantRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Parse a single VCF data line.
///
/// Returns `Ok(None)` for sites that are not biallelic SNPs.
pub fn parse_record(line: &str, line_num: usize) -> Result<Option<VariantRecord>> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < FIRST_OPTIONAL_COLUMN {
        return Err(McorrError::parse(
            line_num,
            format!(
                "Expected at least {} fields, got {}",
                FIRST_OPTIONAL_COLUMN,
                fields.len()
            ),
        ));
    }

    // Position ordering drives windowing, so a bad POS is fatal
    let pos: u64 = fields[1]
        .parse()
        .map_err(|_| McorrError::parse(line_num, format!("Invalid POS field '{}'", fields[1])))?;

    let ref_allele = fields[3];
    let alt_allele = fields[4];
    if !is_snv(ref_allele, alt_allele) {
        return Ok(None);
    }

    let genotypes = decode_sample_columns(&fields[FIRST_OPTIONAL_COLUMN..]);

    Ok(Some(VariantRecord::new(
        fields[0],
        pos,
        ref_allele,
        alt_allele,
        genotypes,
    )))
}

/// Locate the FORMAT column carrying `GT` and decode every sample after it.
fn decode_sample_columns(columns: &[&str]) -> Vec<u8> {
    let mut genotypes = Vec::new();

    let Some((format_col, gt_idx)) = columns.iter().enumerate().find_map(|(i, col)| {
        col.split(':')
            .position(|key| key == GT_KEY)
            .map(|gt_idx| (i, gt_idx))
    }) else {
        return genotypes;
    };

    genotypes.reserve(2 * (columns.len() - format_col - 1));
    for sample in &columns[format_col + 1..] {
        let gt = sample.split(':').nth(gt_idx).unwrap_or("");
        decode_genotype(gt, &mut genotypes);
    }
    genotypes
}
