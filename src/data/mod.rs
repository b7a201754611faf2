//! # Data Module
//!
//! In-memory representations of variant sites and the settings that shape
//! how they are compared.
//!
//! - `genotype`: per-sample GT token decoding and the comparison alphabet
//! - `record`: one decoded biallelic SNP site
//! - `sample_mask`: optional subpopulation restriction

pub mod genotype;
pub mod record;
pub mod sample_mask;

// Re-export commonly used types
pub use genotype::{decode_genotype, Alphabet};
pub use record::VariantRecord;
pub use sample_mask::SampleMask;
