//! # Pipeline Module
//!
//! High-level orchestration of a correlation run.
//! Coordinates I/O, windowing, and aggregation.

pub mod correlation;

pub use correlation::{
    compute_profile, CorrelationPipeline, CorrelationState, PairingSettings, RunSummary,
};
