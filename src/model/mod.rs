//! # Model Module
//!
//! The pairing and aggregation algorithms:
//! - `window`: sliding window that dispatches every in-range site pair once
//! - `aggregator`: per-lag folding of the two-site statistic
//! - `nucl_cov`: doublet-count accumulator behind the `PairAccumulator` trait

pub mod aggregator;
pub mod nucl_cov;
pub mod window;

pub use aggregator::{AggregateStats, CorrelationRow, LagAccumulators, LagAggregator, StatKind};
pub use nucl_cov::{NuclCov, PairAccumulator};
pub use window::SlidingWindow;
