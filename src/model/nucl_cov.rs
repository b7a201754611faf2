//! # Genotype Pair Accumulator
//!
//! Tallies co-occurring genotype codes at two sites into a `k×k` doublet
//! matrix over the alphabet and reduces it to a two-site statistic.

use crate::data::genotype::Alphabet;

/// Capability consumed by the lag aggregator: record genotype pairs, then
/// reduce them to `(numerator, sample-pair count)`.
pub trait PairAccumulator {
    /// Fresh, empty accumulator over `alphabet`
    fn with_alphabet(alphabet: &Alphabet) -> Self
    where
        Self: Sized;

    /// Record one sample's codes at the two sites
    fn add(&mut self, a: u8, b: u8);

    /// Two-site statistic ignoring doublet cells with `<= min_allele_num` counts
    fn p11(&self, min_allele_num: usize) -> (f64, usize);
}

/// Doublet count matrix over a genotype alphabet
#[derive(Clone, Debug)]
pub struct NuclCov {
    alphabet: Alphabet,
    /// Row-major `k×k` counts; row = code at first site, column = second
    doublets: Vec<usize>,
}

impl NuclCov {
    pub fn new(alphabet: &Alphabet) -> Self {
        let k = alphabet.len();
        Self {
            alphabet: alphabet.clone(),
            doublets: vec![0; k * k],
        }
    }

    /// Total pairs recorded
    pub fn count(&self) -> usize {
        self.doublets.iter().sum()
    }

    pub fn doublets(&self) -> &[usize] {
        &self.doublets
    }
}

impl PairAccumulator for NuclCov {
    fn with_alphabet(alphabet: &Alphabet) -> Self {
        Self::new(alphabet)
    }

    #[inline]
    fn add(&mut self, a: u8, b: u8) {
        if let (Some(ia), Some(ib)) = (self.alphabet.index_of(a), self.alphabet.index_of(b)) {
            self.doublets[ia * self.alphabet.len() + ib] += 1;
        }
    }

    /// Ordered pairs of distinct samples that differ at both sites.
    ///
    /// `xy = 2 Σ_{i<j} c_i c_j` over cells differing in both coordinates,
    /// `n = N(N-1)` with `N` the retained sample count.
    fn p11(&self, min_allele_num: usize) -> (f64, usize) {
        let k = self.alphabet.len();
        let mut xy = 0.0;
        let mut total = 0usize;

        for (i, &ci) in self.doublets.iter().enumerate() {
            if ci <= min_allele_num {
                continue;
            }
            total += ci;
            for (j, &cj) in self.doublets.iter().enumerate().skip(i + 1) {
                if cj > min_allele_num && i / k != j / k && i % k != j % k {
                    xy += (ci * cj) as f64;
                }
            }
        }

        (2.0 * xy, total * total.saturating_sub(1))
    }
}
