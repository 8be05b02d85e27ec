//! Append-only text sink for per-sample contributions and the final rate line.
//!
//! Each sample is written as `%18.10g ` on its own line; the run ends with a
//! `#`-prefixed line of four `%14.6g` fields: T, 1000/T, k and log10 k.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use crate::error::Result;

/// Width and precision of a per-sample line.
pub const SAMPLE_FORMAT: (usize, usize) = (18, 10);
/// Width and precision of each summary field.
pub const SUMMARY_FORMAT: (usize, usize) = (14, 6);

fn strip_trailing_zeros(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}

/// Format `value` like C's `printf("%W.Pg")`: `precision` significant
/// digits, fixed or exponential notation depending on the exponent,
/// trailing zeros removed, right-aligned to `width`.
pub fn format_g(value: f64, width: usize, precision: usize) -> String {
    let body = if value.is_nan() {
        "nan".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "inf".to_string() } else { "-inf".to_string() }
    } else {
        let precision = precision.max(1);
        let sci = format!("{:.*e}", precision - 1, value);
        let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
        let exponent: i32 = exponent.parse().unwrap_or(0);

        if exponent < -4 || exponent >= precision as i32 {
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", strip_trailing_zeros(mantissa), sign, exponent.abs())
        } else {
            let decimals = (precision as i32 - 1 - exponent) as usize;
            strip_trailing_zeros(&format!("{:.*}", decimals, value)).to_string()
        }
    };
    format!("{:>width$}", body, width = width)
}

/// Buffered append-mode writer, flushed every `flush_interval` records.
pub struct ResultSink<W: Write> {
    writer: W,
    flush_interval: usize,
    pending: usize,
    records: usize,
}

impl ResultSink<BufWriter<File>> {
    /// Open (or create) `path` for appending.
    pub fn append_to<P: AsRef<Path>>(path: P, flush_interval: usize) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(file), flush_interval))
    }
}

impl<W: Write> ResultSink<W> {
    pub fn new(writer: W, flush_interval: usize) -> Self {
        Self {
            writer,
            flush_interval: flush_interval.max(1),
            pending: 0,
            records: 0,
        }
    }

    /// Number of per-sample lines written so far.
    pub fn records(&self) -> usize {
        self.records
    }

    pub fn write_contribution(&mut self, contribution: f64) -> Result<()> {
        let (width, precision) = SAMPLE_FORMAT;
        writeln!(self.writer, "{} ", format_g(contribution, width, precision))?;
        self.records += 1;
        self.pending += 1;
        if self.pending >= self.flush_interval {
            self.writer.flush()?;
            self.pending = 0;
        }
        Ok(())
    }

    pub fn write_summary(&mut self, temperature: f64, rate_constant: f64) -> Result<()> {
        let (width, precision) = SUMMARY_FORMAT;
        let fields = [temperature, 1000.0 / temperature, rate_constant, rate_constant.log10()];
        write!(self.writer, "#")?;
        for field in fields {
            write!(self.writer, " {}", format_g(field, width, precision))?;
        }
        writeln!(self.writer, " ")?;
        self.writer.flush()?;
        self.pending = 0;
        Ok(())
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_g_fixed_notation() {
        assert_eq!(format_g(0.5, 18, 10), "               0.5");
        assert_eq!(format_g(2000.0, 14, 6), "          2000");
        assert_eq!(format_g(0.0, 5, 6), "    0");
        assert_eq!(format_g(-1.25, 0, 6), "-1.25");
        assert_eq!(format_g(123456.0, 0, 6), "123456");
        assert_eq!(format_g(0.0001, 0, 6), "0.0001");
        assert_eq!(format_g(1.0 / 3.0, 0, 10), "0.3333333333");
    }

    #[test]
    fn test_format_g_exponential_notation() {
        assert_eq!(format_g(1234567.0, 14, 6), "   1.23457e+06");
        assert_eq!(format_g(0.00001, 0, 6), "1e-05");
        assert_eq!(format_g(-6.02214076e23, 0, 6), "-6.02214e+23");
        assert_eq!(format_g(1.5e-123, 0, 6), "1.5e-123");
        // rounding carries into the exponent
        assert_eq!(format_g(999999.7, 0, 6), "1e+06");
    }

    #[test]
    fn test_format_g_non_finite() {
        assert_eq!(format_g(f64::NAN, 6, 6), "   nan");
        assert_eq!(format_g(f64::NEG_INFINITY, 0, 6), "-inf");
    }

    #[test]
    fn test_sink_line_layout() {
        let mut sink = ResultSink::new(Vec::new(), 1);
        sink.write_contribution(0.25).unwrap();
        sink.write_contribution(-3.0).unwrap();
        sink.write_summary(2000.0, 100.0).unwrap();
        assert_eq!(sink.records(), 2);
        let text = String::from_utf8(sink.finish().unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "              0.25 ");
        assert_eq!(lines[1], "                -3 ");
        assert_eq!(
            lines[2],
            "#           2000            0.5            100              2 "
        );
    }

    #[test]
    fn test_sink_appends_to_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rates.dat");
        std::fs::write(&path, "previous run\n").unwrap();

        let mut sink = ResultSink::append_to(&path, 4).unwrap();
        sink.write_contribution(1.0).unwrap();
        sink.finish().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "previous run\n                 1 \n");
    }
}
