//! # Genotype Decoding
//!
//! Turns one sample's `GT` token into zero or more single-byte genotype codes.
//!
//! - Phased (`0|1`) and haploid (`1`) tokens emit every allele in order, so a
//!   diploid phased call contributes two observations.
//! - Unphased (`0/1`) tokens collapse to a single code when all alleles agree
//!   and contribute nothing otherwise.
//!
//! Bytes that are not in the [`Alphabet`] (e.g. `.` for a missing allele) are
//! still emitted; they hold their slot and are skipped at comparison time.

/// Phased allele separator
pub const PHASED_SEP: u8 = b'|';

/// Unphased allele separator
pub const UNPHASED_SEP: u8 = b'/';

/// Set of genotype codes that participate in pair comparisons.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<u8>,
}

impl Alphabet {
    pub fn new(symbols: &[u8]) -> Self {
        Self {
            symbols: symbols.to_vec(),
        }
    }

    /// Number of symbols
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Index of `code` within the alphabet, if present
    #[inline]
    pub fn index_of(&self, code: u8) -> Option<usize> {
        self.symbols.iter().position(|&s| s == code)
    }

    #[inline]
    pub fn contains(&self, code: u8) -> bool {
        self.symbols.contains(&code)
    }

    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }
}

impl Default for Alphabet {
    /// Allele classes `0`..`3`
    fn default() -> Self {
        Self::new(b"0123")
    }
}

/// Decode one genotype token, appending its codes to `out`.
///
/// Returns the number of codes appended.
pub fn decode_genotype(token: &str, out: &mut Vec<u8>) -> usize {
    let bytes = token.as_bytes();

    if bytes.contains(&UNPHASED_SEP) {
        return match resolve_unphased(bytes) {
            Some(code) => {
                out.push(code);
                1
            }
            None => 0,
        };
    }

    let before = out.len();
    out.extend(bytes.iter().copied().filter(|&b| b != PHASED_SEP));
    out.len() - before
}

/// Shared allele of an unphased call, or `None` when alleles disagree.
fn resolve_unphased(bytes: &[u8]) -> Option<u8> {
    let mut current: Option<u8> = None;
    for &b in bytes.iter().filter(|&&b| b != UNPHASED_SEP) {
        match current {
            Some(c) if c != b => return None,
            _ => current = Some(b),
        }
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(token: &str) -> Vec<u8> {
        let mut out = Vec::new();
        decode_genotype(token, &mut out);
        out
    }

    #[test]
    fn test_phased_keeps_both_alleles() {
        assert_eq!(decode("0|1"), b"01".to_vec());
        assert_eq!(decode("1|0"), b"10".to_vec());
        assert_eq!(decode("2|2"), b"22".to_vec());
    }

    #[test]
    fn test_unphased_agreement() {
        assert_eq!(decode("1/1"), b"1".to_vec());
        assert_eq!(decode("0/0"), b"0".to_vec());
        assert!(decode("0/1").is_empty());
        assert!(decode("1/2").is_empty());
    }

    #[test]
    fn test_missing_alleles_hold_their_slot() {
        assert_eq!(decode(".|."), b"..".to_vec());
        assert_eq!(decode("./."), b".".to_vec());
        assert!(decode("./1").is_empty());
    }

    #[test]
    fn test_haploid_and_empty() {
        assert_eq!(decode("1"), b"1".to_vec());
        assert!(decode("").is_empty());
        assert!(decode("/").is_empty());
    }

    #[test]
    fn test_appends_and_counts() {
        let mut out = b"0".to_vec();
        assert_eq!(decode_genotype("1|1", &mut out), 2);
        assert_eq!(decode_genotype("0/1", &mut out), 0);
        assert_eq!(out, b"011".to_vec());
    }

    #[test]
    fn test_alphabet_membership() {
        let alphabet = Alphabet::default();
        assert_eq!(alphabet.len(), 4);
        assert_eq!(alphabet.index_of(b'2'), Some(2));
        assert!(alphabet.contains(b'3'));
        assert!(!alphabet.contains(b'4'));
        assert!(!alphabet.contains(b'.'));
    }
}
