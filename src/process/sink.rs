// src/process/sink.rs
use anyhow::{Context, Result};
use csv::{Terminator, WriterBuilder};
use std::io::Write;

/// Label of the optional leading row-number column.
pub const COUNT_COLUMN: &str = "count";

/// Writes CSV records one at a time, flushing after each so a live
/// `mongostat | mongostat-csv` pipe shows rows as they arrive.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    /// Next row number to hand out; `None` when row counting is off.
    next_row: Option<u64>,
    rows_written: u64,
}

impl<W: Write> CsvSink<W> {
    pub fn new(out: W, row_count: bool) -> Self {
        let writer = WriterBuilder::new()
            .terminator(Terminator::Any(b'\n'))
            .from_writer(out);
        Self {
            writer,
            next_row: row_count.then_some(1),
            rows_written: 0,
        }
    }

    /// Write the column-name row. Prefixed with `count` when counting rows.
    pub fn write_header<'a, I>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let prefix: Option<&'a str> = self.next_row.map(|_| COUNT_COLUMN);
        self.writer
            .write_record(prefix.into_iter().chain(names))
            .context("writing header row")?;
        self.writer.flush().context("flushing header row")
    }

    /// Write one data row. The row number only advances on a successful write.
    pub fn write_row(&mut self, fields: &[&str]) -> Result<()> {
        match self.next_row {
            Some(n) => {
                let count = n.to_string();
                self.writer
                    .write_record(std::iter::once(count.as_str()).chain(fields.iter().copied()))
                    .context("writing data row")?;
                self.next_row = Some(n + 1);
            }
            None => self
                .writer
                .write_record(fields)
                .context("writing data row")?,
        }
        self.rows_written += 1;
        self.writer.flush().context("flushing data row")
    }

    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("flushing csv output: {}", e.error()))
    }
}
