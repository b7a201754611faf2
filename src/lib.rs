//! # mcorr-vcf Library
//!
//! Genotype correlation profiles from VCF files: for every distance ("lag")
//! between two biallelic SNPs on the same chromosome, the mean two-site
//! statistic over sampled individuals, normalized by the lag-0 diversity.
//!
//! ## Modules
//! - `config`: CLI argument parsing and validation
//! - `data`: Variant records, genotype decoding, sample masks
//! - `error`: Error types and result aliases
//! - `io`: VCF streaming, subpopulation files, table output
//! - `model`: Sliding window pairing and per-lag aggregation
//! - `pipelines`: End-to-end run orchestration

pub mod config;
pub mod data;
pub mod error;
pub mod io;
pub mod model;
pub mod pipelines;

// Re-export commonly used types
pub use config::Config;
pub use data::{Alphabet, SampleMask, VariantRecord};
pub use error::{McorrError, Result};
pub use io::{RecordStream, VcfRecordReader};
pub use model::{LagAccumulators, LagAggregator, NuclCov, PairAccumulator, SlidingWindow};
pub use pipelines::{CorrelationPipeline, PairingSettings, RunSummary};
