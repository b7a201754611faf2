//! # Sliding Window Pairing
//!
//! Single forward pass that hands every same-chromosome pair of records with
//! `0 <= other.pos - anchor.pos < max_lag` to a dispatch callback exactly once.
//!
//! The buffer holds records that may still pair with a future record. When an
//! incoming record falls outside the front record's reach (too far, or on
//! another chromosome), the front is dispatched against the whole buffer and
//! evicted; this repeats until the incoming record fits, and it is then
//! appended. Each dispatch receives a slice whose first element is the anchor.

use std::collections::VecDeque;

use crate::data::record::VariantRecord;
use crate::error::{McorrError, Result};

/// Buffer of records eligible to pair with records not yet seen
#[derive(Debug)]
pub struct SlidingWindow {
    max_lag: u64,
    buffer: VecDeque<VariantRecord>,
    /// Chromosome of every buffered record; `None` until the first append
    current_chrom: Option<String>,
    windows_dispatched: u64,
}

impl SlidingWindow {
    pub fn new(max_lag: u64) -> Self {
        Self {
            max_lag,
            buffer: VecDeque::new(),
            current_chrom: None,
            windows_dispatched: 0,
        }
    }

    pub fn max_lag(&self) -> u64 {
        self.max_lag
    }

    /// Number of buffered records
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn current_chrom(&self) -> Option<&str> {
        self.current_chrom.as_deref()
    }

    /// Anchors dispatched so far
    pub fn windows_dispatched(&self) -> u64 {
        self.windows_dispatched
    }

    /// Ingest `record`, dispatching every anchor it supersedes.
    ///
    /// Fails if `record` sits before the newest buffered record on the same
    /// chromosome.
    pub fn push<F>(&mut self, record: VariantRecord, mut dispatch: F) -> Result<()>
    where
        F: FnMut(&[VariantRecord]),
    {
        if let Some(last) = self.buffer.back() {
            if self.current_chrom.as_deref() == Some(record.chrom.as_str()) && record.pos < last.pos
            {
                return Err(McorrError::invalid_data(format!(
                    "position {} on chromosome {} follows position {}; input must be sorted",
                    record.pos, record.chrom, last.pos
                )));
            }
        }

        while !self.fits(&record) {
            self.dispatch_front(&mut dispatch);
        }

        if self.buffer.is_empty() {
            self.current_chrom = Some(record.chrom.clone());
        }
        self.buffer.push_back(record);
        Ok(())
    }

    /// Dispatch and evict every remaining anchor
    pub fn finish<F>(&mut self, mut dispatch: F)
    where
        F: FnMut(&[VariantRecord]),
    {
        while !self.buffer.is_empty() {
            self.dispatch_front(&mut dispatch);
        }
        self.current_chrom = None;
    }

    fn fits(&self, record: &VariantRecord) -> bool {
        match self.buffer.front() {
            None => true,
            Some(front) => {
                self.current_chrom.as_deref() == Some(record.chrom.as_str())
                    && record.pos - front.pos < self.max_lag
            }
        }
    }

    fn dispatch_front<F>(&mut self, dispatch: &mut F)
    where
        F: FnMut(&[VariantRecord]),
    {
        dispatch(self.buffer.make_contiguous());
        self.buffer.pop_front();
        self.windows_dispatched += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(chrom: &str, pos: u64) -> VariantRecord {
        VariantRecord::new(chrom, pos, "A", "G", Vec::new())
    }

    /// Run the window over `records`, collecting (anchor, other) position pairs
    fn collect_pairs(max_lag: u64, records: Vec<VariantRecord>) -> Vec<(String, u64, u64)> {
        let mut pairs = Vec::new();
        let mut window = SlidingWindow::new(max_lag);
        let mut sink = |w: &[VariantRecord]| {
            for other in w {
                pairs.push((w[0].chrom.clone(), w[0].pos, other.pos));
            }
        };
        for r in records {
            window.push(r, &mut sink).unwrap();
        }
        window.finish(&mut sink);
        pairs
    }

    #[test]
    fn test_pairs_within_lag() {
        let pairs = collect_pairs(
            300,
            vec![rec("1", 100), rec("1", 150), rec("1", 600)],
        );
        assert_eq!(
            pairs,
            vec![
                ("1".into(), 100, 100),
                ("1".into(), 100, 150),
                ("1".into(), 150, 150),
                ("1".into(), 600, 600),
            ]
        );
    }

    #[test]
    fn test_chromosome_change_flushes() {
        let pairs = collect_pairs(1000, vec![rec("1", 100), rec("1", 200), rec("2", 150)]);
        assert_eq!(
            pairs,
            vec![
                ("1".into(), 100, 100),
                ("1".into(), 100, 200),
                ("1".into(), 200, 200),
                ("2".into(), 150, 150),
            ]
        );
    }

    #[test]
    fn test_final_buffer_fully_flushed() {
        let pairs = collect_pairs(100, vec![rec("1", 10), rec("1", 20), rec("1", 30)]);
        assert_eq!(pairs.len(), 6);
    }

    #[test]
    fn test_zero_max_lag_only_self_pairs() {
        let pairs = collect_pairs(0, vec![rec("1", 10), rec("1", 10), rec("1", 11)]);
        assert!(pairs.iter().all(|(_, a, b)| a == b));
        assert_eq!(pairs.len(), 3);
    }

    #[test]
    fn test_lag_bound_is_exclusive() {
        let pairs = collect_pairs(50, vec![rec("1", 100), rec("1", 150)]);
        assert!(!pairs.contains(&("1".into(), 100, 150)));
    }

    #[test]
    fn test_duplicate_positions_pair() {
        let pairs = collect_pairs(10, vec![rec("1", 5), rec("1", 5)]);
        assert_eq!(
            pairs,
            vec![("1".into(), 5, 5), ("1".into(), 5, 5), ("1".into(), 5, 5)]
        );
    }

    #[test]
    fn test_unsorted_input_rejected() {
        let mut window = SlidingWindow::new(300);
        window.push(rec("1", 100), |_| {}).unwrap();
        window.push(rec("1", 200), |_| {}).unwrap();
        let err = window.push(rec("1", 150), |_| {}).unwrap_err();
        assert!(matches!(err, McorrError::InvalidData { .. }));
    }

    #[test]
    fn test_state_tracking() {
        let mut window = SlidingWindow::new(300);
        assert!(window.current_chrom().is_none());
        window.push(rec("7", 1), |_| {}).unwrap();
        window.push(rec("7", 2), |_| {}).unwrap();
        assert_eq!(window.current_chrom(), Some("7"));
        assert_eq!(window.len(), 2);
        window.finish(|_| {});
        assert!(window.is_empty());
        assert_eq!(window.windows_dispatched(), 2);
    }
}
