//! # Variant Records
//!
//! One qualifying biallelic SNP site with its decoded genotype codes.

/// A biallelic SNP site as read from the VCF
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariantRecord {
    /// Chromosome name; pairs never cross chromosomes
    pub chrom: String,
    /// 1-based genomic position
    pub pos: u64,
    pub ref_allele: String,
    pub alt_allele: String,
    /// One code per decoded observation, in sample column order
    pub genotypes: Vec<u8>,
}

impl VariantRecord {
    pub fn new(
        chrom: impl Into<String>,
        pos: u64,
        ref_allele: impl Into<String>,
        alt_allele: impl Into<String>,
        genotypes: Vec<u8>,
    ) -> Self {
        Self {
            chrom: chrom.into(),
            pos,
            ref_allele: ref_allele.into(),
            alt_allele: alt_allele.into(),
            genotypes,
        }
    }

    /// True if both REF and ALT are a single base
    pub fn is_snv(&self) -> bool {
        is_snv(&self.ref_allele, &self.alt_allele)
    }

    /// Number of genotype codes (observations) carried by this record
    pub fn n_genotypes(&self) -> usize {
        self.genotypes.len()
    }
}

/// True if both alleles are exactly one character.
#[inline]
pub fn is_snv(ref_allele: &str, alt_allele: &str) -> bool {
    ref_allele.chars().count() == 1 && alt_allele.chars().count() == 1
}
