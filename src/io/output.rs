//! # Correlation Table Output
//!
//! Writes reduced per-lag rows as CSV with header `l,m,n,v,t,b`:
//! lag, value, a constant `0` placeholder, contributing pair count,
//! statistic kind (`Ks`/`P2`), and the population label `all`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info_span;

use crate::error::Result;
use crate::model::aggregator::CorrelationRow;

/// CSV header line
pub const TABLE_HEADER: &str = "l,m,n,v,t,b";

/// Population label written in the last column
pub const POPULATION_LABEL: &str = "all";

/// Write `rows` to a new file at `path`
pub fn write_table(path: &Path, rows: &[CorrelationRow]) -> Result<()> {
    info_span!("write_table", path = ?path, rows = rows.len()).in_scope(|| {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        write_rows(&mut writer, rows)?;
        writer.flush()?;
        Ok(())
    })
}

/// Write header and rows to any sink
pub fn write_rows<W: Write>(writer: &mut W, rows: &[CorrelationRow]) -> Result<()> {
    writeln!(writer, "{}", TABLE_HEADER)?;
    for row in rows {
        writeln!(
            writer,
            "{},{},0,{},{},{}",
            row.lag,
            format_general(row.value),
            row.n_pairs,
            row.kind,
            POPULATION_LABEL
        )?;
    }
    Ok(())
}

/// Shortest round-trip rendering in `%g` style.
///
/// Decimal notation for exponents in `[-4, 6)`, otherwise `d.ddde±XX`.
pub fn format_general(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "+Inf" } else { "-Inf" };
        return text.to_string();
    }
    if value == 0.0 {
        let text = if value.is_sign_negative() { "-0" } else { "0" };
        return text.to_string();
    }

    // `{:e}` yields the shortest digits that round-trip, e.g. "-1.25e-7"
    let sci = format!("{:e}", value);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };

    if !(-4..6).contains(&exp) {
        let exp_sign = if exp < 0 { '-' } else { '+' };
        return format!("{}{}e{}{:02}", sign, mantissa, exp_sign, exp.abs());
    }

    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let fixed = if exp < 0 {
        format!("0.{}{}", "0".repeat((-exp - 1) as usize), digits)
    } else {
        let int_len = exp as usize + 1;
        if digits.len() <= int_len {
            format!("{}{}", digits, "0".repeat(int_len - digits.len()))
        } else {
            format!("{}.{}", &digits[..int_len], &digits[int_len..])
        }
    };
    format!("{}{}", sign, fixed)
}
