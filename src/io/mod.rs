//! # I/O Module
//!
//! File reading/writing boundaries. Converts VCF lines into `VariantRecord`s,
//! loads the subpopulation mask, and writes the correlation table.

pub mod output;
pub mod streaming;
pub mod subpop;
pub mod vcf;

pub use output::write_table;
pub use streaming::RecordStream;
pub use subpop::read_sample_mask;
pub use vcf::VcfRecordReader;
