//! Property-based tests using proptest.
//!
//! - Every same-chromosome pair within the lag bound is dispatched exactly once
//! - Genotype decoding never emits separators and respects phasing rules

use std::collections::BTreeMap;

use proptest::prelude::*;

use mcorr_vcf::data::genotype::decode_genotype;
use mcorr_vcf::model::window::SlidingWindow;
use mcorr_vcf::VariantRecord;

/// Sorted (chrom, pos) records; chromosomes appear in contiguous blocks
fn sorted_records() -> impl Strategy<Value = Vec<(u8, u64)>> {
    prop::collection::vec((0u8..3, 0u64..400), 0..40).prop_map(|mut v| {
        v.sort();
        v
    })
}

/// Pairs dispatched by the window, as multiset of (anchor index, other index)
fn dispatched_pairs(max_lag: u64, records: &[(u8, u64)]) -> BTreeMap<(usize, usize), usize> {
    // genotypes carry the record index so dispatches can be traced back
    let to_record = |i: usize, &(chrom, pos): &(u8, u64)| {
        VariantRecord::new(chrom.to_string(), pos, "A", "G", (i as u32).to_le_bytes().to_vec())
    };
    let index_of = |r: &VariantRecord| {
        u32::from_le_bytes([r.genotypes[0], r.genotypes[1], r.genotypes[2], r.genotypes[3]])
            as usize
    };

    let mut pairs = BTreeMap::new();
    let mut sink = |w: &[VariantRecord]| {
        let anchor = index_of(&w[0]);
        for other in w {
            *pairs.entry((anchor, index_of(other))).or_insert(0) += 1;
        }
    };

    let mut window = SlidingWindow::new(max_lag);
    for (i, r) in records.iter().enumerate() {
        window.push(to_record(i, r), &mut sink).unwrap();
    }
    window.finish(&mut sink);
    pairs
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_window_completeness(records in sorted_records(), max_lag in 0u64..150) {
        let got = dispatched_pairs(max_lag, &records);

        let mut expected = BTreeMap::new();
        for i in 0..records.len() {
            // self-pair always present
            expected.insert((i, i), 1);
            for j in (i + 1)..records.len() {
                let (ci, pi) = records[i];
                let (cj, pj) = records[j];
                if ci == cj && pj - pi < max_lag {
                    expected.insert((i, j), 1);
                }
            }
        }

        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_phased_emits_every_allele(alleles in prop::collection::vec(0u8..4, 1..4)) {
        let token: Vec<String> = alleles.iter().map(|a| a.to_string()).collect();
        let token = token.join("|");
        let mut out = Vec::new();
        let n = decode_genotype(&token, &mut out);
        prop_assert_eq!(n, alleles.len());
        let expected: Vec<u8> = alleles.iter().map(|a| b'0' + a).collect();
        prop_assert_eq!(out, expected);
    }

    #[test]
    fn prop_unphased_emits_at_most_one(alleles in prop::collection::vec(0u8..4, 1..4)) {
        let token: Vec<String> = alleles.iter().map(|a| a.to_string()).collect();
        let token = token.join("/");
        let mut out = Vec::new();
        let n = decode_genotype(&token, &mut out);
        let all_same = alleles.iter().all(|&a| a == alleles[0]);
        if all_same {
            prop_assert_eq!(out, vec![b'0' + alleles[0]]);
        } else {
            prop_assert_eq!(n, 0);
            prop_assert!(out.is_empty());
        }
    }
}
