//! # Correlation Pipeline
//!
//! Orchestrates one run: load the subpopulation mask, stream records from the
//! VCF on a background thread, pair them through the sliding window, fold the
//! pairs per lag, and write the reduced table.
//!
//! The output file is created only after the whole input has been consumed,
//! so a run that fails leaves nothing behind.

use tracing::{debug, info, info_span};

use crate::config::Config;
use crate::data::genotype::Alphabet;
use crate::data::record::VariantRecord;
use crate::data::sample_mask::SampleMask;
use crate::error::Result;
use crate::io::output::write_table;
use crate::io::streaming::RecordStream;
use crate::io::subpop::read_sample_mask;
use crate::io::vcf::VcfRecordReader;
use crate::model::aggregator::{LagAccumulators, LagAggregator};
use crate::model::nucl_cov::{NuclCov, PairAccumulator};
use crate::model::window::SlidingWindow;

/// Record filters and window bound for one run
#[derive(Clone, Debug)]
pub struct PairingSettings {
    pub max_lag: usize,
    pub region_start: u64,
    pub region_end: u64,
    pub chrom: Option<String>,
    pub alphabet: Alphabet,
}

impl PairingSettings {
    pub fn new(max_lag: usize) -> Self {
        Self {
            max_lag,
            region_start: 1,
            region_end: u64::MAX,
            chrom: None,
            alphabet: Alphabet::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            max_lag: config.max_corr_length,
            region_start: config.region_start,
            region_end: config.region_end,
            chrom: config.chrom_filter().map(str::to_string),
            alphabet: Alphabet::default(),
        }
    }

    fn in_region(&self, pos: u64) -> bool {
        pos >= self.region_start && pos <= self.region_end
    }
}

/// Counters reported at the end of a run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// SNP records received from the stream
    pub records_read: u64,
    /// Records dropped by the chromosome filter
    pub records_skipped: u64,
    /// True if a record outside the region ended the run
    pub stopped_at_region: bool,
    pub windows_dispatched: u64,
    pub pairs_accepted: u64,
    pub pairs_rejected: u64,
}

/// All mutable state of one pass: window buffer, current chromosome and
/// per-lag accumulators.
pub struct CorrelationState<A: PairAccumulator = NuclCov> {
    settings: PairingSettings,
    window: SlidingWindow,
    aggregator: LagAggregator<A>,
    summary: RunSummary,
}

impl<A: PairAccumulator> CorrelationState<A> {
    pub fn new(settings: PairingSettings, mask: Option<SampleMask>) -> Self {
        let window = SlidingWindow::new(settings.max_lag as u64);
        let aggregator = LagAggregator::new(settings.max_lag, settings.alphabet.clone(), mask);
        Self {
            settings,
            window,
            aggregator,
            summary: RunSummary::default(),
        }
    }

    /// Feed one record. Returns `false` once the run should stop.
    pub fn ingest(&mut self, record: VariantRecord) -> Result<bool> {
        self.summary.records_read += 1;

        if !self.settings.in_region(record.pos) {
            debug!(chrom = %record.chrom, pos = record.pos, "record outside region, stopping");
            self.summary.stopped_at_region = true;
            return Ok(false);
        }
        if let Some(chrom) = &self.settings.chrom {
            if *chrom != record.chrom {
                self.summary.records_skipped += 1;
                return Ok(true);
            }
        }

        let aggregator = &mut self.aggregator;
        self.window.push(record, |w| aggregator.aggregate(w))?;
        Ok(true)
    }

    /// Flush the window and hand back the accumulators
    pub fn finish(mut self) -> (LagAccumulators, RunSummary) {
        let aggregator = &mut self.aggregator;
        self.window.finish(|w| aggregator.aggregate(w));

        let stats = self.aggregator.stats();
        let mut summary = self.summary;
        summary.windows_dispatched = self.window.windows_dispatched();
        summary.pairs_accepted = stats.pairs_accepted;
        summary.pairs_rejected = stats.pairs_rejected;
        (self.aggregator.into_accumulators(), summary)
    }
}

/// Drive `records` through a fresh [`CorrelationState`].
///
/// The first `Err` from the source aborts the run.
pub fn compute_profile<A, I>(
    records: I,
    settings: PairingSettings,
    mask: Option<SampleMask>,
) -> Result<(LagAccumulators, RunSummary)>
where
    A: PairAccumulator,
    I: IntoIterator<Item = Result<VariantRecord>>,
{
    let mut state = CorrelationState::<A>::new(settings, mask);
    for item in records {
        if !state.ingest(item?)? {
            break;
        }
    }
    Ok(state.finish())
}

/// End-to-end run driven by a [`Config`]
pub struct CorrelationPipeline {
    config: Config,
}

impl CorrelationPipeline {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn run(&mut self) -> Result<RunSummary> {
        let span = info_span!("correlation_run", vcf = ?self.config.vcf);
        let _guard = span.enter();

        let mask = self
            .config
            .sub_pop
            .as_deref()
            .map(read_sample_mask)
            .transpose()?;
        if let Some(mask) = &mask {
            info!(n_indices = mask.len(), "using subpopulation mask");
        }

        let reader = VcfRecordReader::open(&self.config.vcf)?;
        let stream = RecordStream::spawn(reader)?;

        let settings = PairingSettings::from_config(&self.config);
        let (accumulators, summary) = compute_profile::<NuclCov, _>(stream, settings, mask)?;

        let rows = accumulators.rows();
        write_table(&self.config.out, &rows)?;

        info!(
            records = summary.records_read,
            skipped = summary.records_skipped,
            windows = summary.windows_dispatched,
            pairs_accepted = summary.pairs_accepted,
            pairs_rejected = summary.pairs_rejected,
            rows = rows.len(),
            "correlation profile written to {:?}",
            self.config.out
        );
        Ok(summary)
    }
}
