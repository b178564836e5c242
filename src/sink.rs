//! CSV sink: one row per call, file opened and closed every time.
//!
//! Dialect (Excel): `,` delimiter, `"` quote, quoting only when needed,
//! `\r\n` record terminator. The sink does not know header from data; the
//! caller decides what a row means.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;

use crate::metrics::record_csv_row;

pub trait RowSink {
    fn write_row(&mut self, fields: &[String]) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Append exactly one record to the file (create if missing).
    pub fn append_row<I, S>(&self, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("open {}", self.path.display()))?;

        let mut wtr = csv::WriterBuilder::new()
            .delimiter(b',')
            .quote(b'"')
            .quote_style(csv::QuoteStyle::Necessary)
            .terminator(csv::Terminator::CRLF)
            .from_writer(file);
        wtr.write_record(fields)
            .with_context(|| format!("write csv row to {}", self.path.display()))?;
        // flush + close (drop) на каждой строке
        wtr.flush()
            .with_context(|| format!("flush {}", self.path.display()))?;
        record_csv_row();
        Ok(())
    }
}

impl RowSink for CsvSink {
    fn write_row(&mut self, fields: &[String]) -> Result<()> {
        self.append_row(fields)
    }
}

/// In-memory sink (tests, dry runs).
impl RowSink for Vec<Vec<String>> {
    fn write_row(&mut self, fields: &[String]) -> Result<()> {
        self.push(fields.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_csv(prefix: &str) -> PathBuf {
        let t = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        std::env::temp_dir().join(format!("xcsv-sink-{prefix}-{}-{t}.csv", std::process::id()))
    }

    #[test]
    fn quotes_only_when_needed_and_uses_crlf() -> Result<()> {
        let path = temp_csv("quote");
        let sink = CsvSink::new(&path);
        sink.append_row(["id", "kpi_date", "value"])?;
        sink.append_row(["1", "a,b", "say \"hi\""])?;
        sink.append_row(["2", "", "line\nbreak"])?;

        let text = std::fs::read_to_string(&path)?;
        assert_eq!(
            text,
            "id,kpi_date,value\r\n1,\"a,b\",\"say \"\"hi\"\"\"\r\n2,,\"line\nbreak\"\r\n"
        );
        std::fs::remove_file(&path)?;
        Ok(())
    }

    #[test]
    fn appends_to_existing_file() -> Result<()> {
        let path = temp_csv("append");
        std::fs::write(&path, "x\r\n")?;
        let mut sink = CsvSink::new(&path);
        sink.write_row(&["y".to_string()])?;
        assert_eq!(std::fs::read_to_string(&path)?, "x\r\ny\r\n");
        std::fs::remove_file(&path)?;
        Ok(())
    }
}
