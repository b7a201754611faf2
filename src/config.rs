//! # Configuration Logic
//!
//! CLI argument parsing and validation.
//!
//! ## Example CLI
//! ```bash
//! mcorr-vcf input.vcf.gz out.csv --max-corr-length 300 --chrom 2 --sub-pop pop.txt
//! ```

use std::path::PathBuf;

use clap::Parser;

use crate::error::{McorrError, Result};

/// Default window bound in base pairs
pub const DEFAULT_MAX_CORR_LENGTH: usize = 300;

/// Upper region bound used when none is given
pub const DEFAULT_REGION_END: u64 = 1_000_000_000_000;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "mcorr-vcf",
    version,
    about = "Calculate mutational correlation from VCF files."
)]
pub struct Config {
    /// VCF input file (plain text, or BGZF with .gz/.bgz extension)
    #[arg(value_name = "VCF_FILE")]
    pub vcf: PathBuf,

    /// Output CSV path
    #[arg(value_name = "OUT_FILE")]
    pub out: PathBuf,

    /// Max length of correlations (bp)
    #[arg(long, default_value_t = DEFAULT_MAX_CORR_LENGTH)]
    pub max_corr_length: usize,

    /// Region start (inclusive); an earlier record ends the run
    #[arg(long, default_value_t = 1)]
    pub region_start: u64,

    /// Region end (inclusive); a later record ends the run
    #[arg(long, default_value_t = DEFAULT_REGION_END)]
    pub region_end: u64,

    /// Subpopulation list: one genotype index per line
    #[arg(long, value_name = "FILE")]
    pub sub_pop: Option<PathBuf>,

    /// Only use records on this chromosome
    #[arg(long)]
    pub chrom: Option<String>,

    /// Verbosity level (repeatable: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Report span timings
    #[arg(long)]
    pub profile: bool,
}

impl Config {
    /// Parse from the process arguments and validate
    pub fn parse_and_validate() -> Result<Self> {
        let config = Self::parse();
        config.validate()?;
        Ok(config)
    }

    /// Check file existence and region bounds
    pub fn validate(&self) -> Result<()> {
        if !self.vcf.exists() {
            return Err(McorrError::FileNotFound {
                path: self.vcf.clone(),
            });
        }
        if let Some(path) = &self.sub_pop {
            if !path.exists() {
                return Err(McorrError::FileNotFound { path: path.clone() });
            }
        }
        if self.region_start > self.region_end {
            return Err(McorrError::config(format!(
                "region start {} is after region end {}",
                self.region_start, self.region_end
            )));
        }
        Ok(())
    }

    /// Chromosome filter, treating an empty name as no filter
    pub fn chrom_filter(&self) -> Option<&str> {
        self.chrom.as_deref().filter(|c| !c.is_empty())
    }

    /// Log level implied by `--verbose`
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["mcorr-vcf"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["in.vcf", "out.csv"]);
        assert_eq!(config.vcf, PathBuf::from("in.vcf"));
        assert_eq!(config.out, PathBuf::from("out.csv"));
        assert_eq!(config.max_corr_length, 300);
        assert_eq!(config.region_start, 1);
        assert_eq!(config.region_end, DEFAULT_REGION_END);
        assert!(config.sub_pop.is_none());
        assert!(config.chrom_filter().is_none());
        assert_eq!(config.log_level(), "warn");
    }

    #[test]
    fn test_flags() {
        let config = parse(&[
            "in.vcf",
            "out.csv",
            "--max-corr-length",
            "150",
            "--region-start",
            "10",
            "--region-end",
            "5000",
            "--chrom",
            "2",
            "--sub-pop",
            "pop.txt",
            "-vv",
        ]);
        assert_eq!(config.max_corr_length, 150);
        assert_eq!(config.region_start, 10);
        assert_eq!(config.region_end, 5000);
        assert_eq!(config.chrom_filter(), Some("2"));
        assert_eq!(config.sub_pop, Some(PathBuf::from("pop.txt")));
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn test_empty_chrom_is_no_filter() {
        let config = parse(&["in.vcf", "out.csv", "--chrom", ""]);
        assert!(config.chrom_filter().is_none());
    }

    #[test]
    fn test_missing_positional_fails() {
        assert!(Config::try_parse_from(["mcorr-vcf", "in.vcf"]).is_err());
    }

    #[test]
    fn test_validate_missing_input() {
        let config = parse(&["/nonexistent/in.vcf", "out.csv"]);
        assert!(matches!(
            config.validate(),
            Err(McorrError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_validate_region_order() {
        let input = tempfile::NamedTempFile::new().unwrap();
        let path = input.path().to_str().unwrap();
        let config = parse(&[path, "out.csv", "--region-start", "100", "--region-end", "50"]);
        assert!(matches!(config.validate(), Err(McorrError::Config { .. })));
    }
}
