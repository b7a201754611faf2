//! # Per-Lag Aggregation
//!
//! Folds the two-site statistic of every dispatched pair into per-lag running
//! sums, then reduces the sums to the output profile.
//!
//! A pair contributes only if more than half of the anchor's genotype codes
//! produced a usable comparison (`n > len / 2`, integer division).

use std::fmt;
use std::marker::PhantomData;

use crate::data::genotype::Alphabet;
use crate::data::record::VariantRecord;
use crate::data::sample_mask::SampleMask;
use crate::model::nucl_cov::{NuclCov, PairAccumulator};

/// Running per-lag sums, indexed by lag
#[derive(Clone, Debug, PartialEq)]
pub struct LagAccumulators {
    statistic_sum: Vec<f64>,
    pair_count: Vec<u64>,
}

impl LagAccumulators {
    /// Accumulators for lags `0..max_lag` (lag 0 always exists)
    pub fn new(max_lag: usize) -> Self {
        let n_lags = max_lag.max(1);
        Self {
            statistic_sum: vec![0.0; n_lags],
            pair_count: vec![0; n_lags],
        }
    }

    pub fn n_lags(&self) -> usize {
        self.statistic_sum.len()
    }

    #[inline]
    pub fn add(&mut self, lag: usize, value: f64) {
        self.statistic_sum[lag] += value;
        self.pair_count[lag] += 1;
    }

    pub fn statistic_sum(&self, lag: usize) -> f64 {
        self.statistic_sum[lag]
    }

    pub fn pair_count(&self, lag: usize) -> u64 {
        self.pair_count[lag]
    }

    /// Reduce to output rows, omitting lags without pairs.
    ///
    /// Lag 0 is the mean statistic (`Ks`); other lags are normalized by the
    /// lag-0 sum (`P2`).
    pub fn rows(&self) -> Vec<CorrelationRow> {
        let base_sum = self.statistic_sum[0];
        (0..self.n_lags())
            .filter(|&lag| self.pair_count[lag] > 0)
            .map(|lag| {
                let n_pairs = self.pair_count[lag];
                let (value, kind) = if lag == 0 {
                    (base_sum / n_pairs as f64, StatKind::Ks)
                } else {
                    (self.statistic_sum[lag] / base_sum, StatKind::P2)
                };
                CorrelationRow {
                    lag,
                    value,
                    n_pairs,
                    kind,
                }
            })
            .collect()
    }
}

/// Kind of value in an output row
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatKind {
    /// Lag-0 baseline diversity
    Ks,
    /// Lag > 0 statistic normalized by the lag-0 sum
    P2,
}

impl StatKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StatKind::Ks => "Ks",
            StatKind::P2 => "P2",
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the correlation profile
#[derive(Clone, Debug, PartialEq)]
pub struct CorrelationRow {
    pub lag: usize,
    pub value: f64,
    pub n_pairs: u64,
    pub kind: StatKind,
}

/// Pair outcome counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AggregateStats {
    pub pairs_accepted: u64,
    /// Pairs failing the coverage filter
    pub pairs_rejected: u64,
}

/// Folds dispatched windows into [`LagAccumulators`]
#[derive(Debug)]
pub struct LagAggregator<A: PairAccumulator = NuclCov> {
    alphabet: Alphabet,
    mask: Option<SampleMask>,
    accumulators: LagAccumulators,
    stats: AggregateStats,
    _acc: PhantomData<A>,
}

impl<A: PairAccumulator> LagAggregator<A> {
    pub fn new(max_lag: usize, alphabet: Alphabet, mask: Option<SampleMask>) -> Self {
        Self {
            alphabet,
            mask,
            accumulators: LagAccumulators::new(max_lag),
            stats: AggregateStats::default(),
            _acc: PhantomData,
        }
    }

    pub fn accumulators(&self) -> &LagAccumulators {
        &self.accumulators
    }

    pub fn stats(&self) -> AggregateStats {
        self.stats
    }

    pub fn into_accumulators(self) -> LagAccumulators {
        self.accumulators
    }

    /// Pair the anchor (`window[0]`) with every record in `window`, itself
    /// included.
    pub fn aggregate(&mut self, window: &[VariantRecord]) {
        let Some(anchor) = window.first() else {
            return;
        };
        let min_pairs = anchor.genotypes.len() / 2;

        for other in window {
            let (xy, n) = self.compare(anchor, other);
            if n > min_pairs {
                let lag = (other.pos - anchor.pos) as usize;
                self.accumulators.add(lag, xy / n as f64);
                self.stats.pairs_accepted += 1;
            } else {
                self.stats.pairs_rejected += 1;
            }
        }
    }

    /// Run a fresh accumulator over the selected sample slots
    fn compare(&self, anchor: &VariantRecord, other: &VariantRecord) -> (f64, usize) {
        let mut acc = A::with_alphabet(&self.alphabet);
        let mut add = |k: usize| {
            if let (Some(&a), Some(&b)) = (anchor.genotypes.get(k), other.genotypes.get(k)) {
                if self.alphabet.contains(a) && self.alphabet.contains(b) {
                    acc.add(a, b);
                }
            }
        };
        match &self.mask {
            Some(mask) => mask.iter().for_each(&mut add),
            None => (0..anchor.genotypes.len()).for_each(&mut add),
        }
        acc.p11(0)
    }
}
