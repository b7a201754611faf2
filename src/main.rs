//! # mcorr-vcf: Mutational Correlation from VCF Files
//!
//! ## Usage
//! ```bash
//! # Whole file, default 300 bp window
//! mcorr-vcf input.vcf out.csv
//!
//! # One chromosome, a subpopulation, with timing output
//! mcorr-vcf input.vcf.gz out.csv --chrom 2 --sub-pop pop.txt --profile -v
//! ```

use std::time::Instant;

use tracing_subscriber::EnvFilter;

use mcorr_vcf::config::Config;
use mcorr_vcf::pipelines::CorrelationPipeline;
use mcorr_vcf::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize the tracing subscriber; `--profile` adds span close timings
fn init_logging(config: &Config) {
    use tracing_subscriber::fmt::format::FmtSpan;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level()));
    let span_events = if config.profile {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(span_events)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let start = Instant::now();

    // Parse and validate configuration
    let config = Config::parse_and_validate()?;
    init_logging(&config);

    tracing::info!("mcorr-vcf v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        input = ?config.vcf,
        max_corr_length = config.max_corr_length,
        chrom = config.chrom_filter().unwrap_or("*"),
        "starting"
    );

    let mut pipeline = CorrelationPipeline::new(config);
    pipeline.run()?;

    tracing::info!("Completed in {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}
