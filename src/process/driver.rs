// src/process/driver.rs
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::{debug, info, instrument, trace, warn};

use crate::catalog::{is_banner_line, is_header_line};
use crate::error::ConvertError;
use crate::process::{
    header::{parse_header, strategies_disagree, HeaderMapping, HeaderStrategy},
    project::Selection,
    sink::CsvSink,
    tokenize::tokenize_line,
};

/// Knobs for one conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Columns to write, in order. Empty means every column the header has.
    pub columns: Vec<String>,
    /// Skip writing the header row.
    pub no_headers: bool,
    /// Prepend a 1-based `count` column.
    pub row_count: bool,
    /// Write the header row of the selected columns, then stop.
    pub list_columns: bool,
    pub header_strategy: HeaderStrategy,
}

/// Where the driver is in the input stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    AwaitingBanner,
    AwaitingHeader,
    HeaderParsed,
    Streaming,
    Done,
}

/// Totals for one conversion, logged once the input is exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertStats {
    pub lines_read: u64,
    pub rows_written: u64,
    pub rows_skipped: u64,
    pub repeated_headers: u64,
    /// Lines thrown away before the first header, banner included.
    pub preamble_lines: u64,
}

/// Line-at-a-time state machine turning mongostat output into CSV records.
pub struct StreamDriver {
    options: ConvertOptions,
    state: DriverState,
    mapping: Option<HeaderMapping>,
    selection: Selection,
    stats: ConvertStats,
}

impl StreamDriver {
    pub fn new(options: ConvertOptions) -> Self {
        Self {
            options,
            state: DriverState::AwaitingBanner,
            mapping: None,
            selection: Selection::default(),
            stats: ConvertStats::default(),
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn mapping(&self) -> Option<&HeaderMapping> {
        self.mapping.as_ref()
    }

    pub fn is_done(&self) -> bool {
        self.state == DriverState::Done
    }

    /// Feed one input line (terminator optional).
    pub fn process_line<W: Write>(&mut self, line: &str, sink: &mut CsvSink<W>) -> Result<()> {
        self.stats.lines_read += 1;
        let line = line.trim_end_matches(['\n', '\r']);

        match self.state {
            DriverState::AwaitingBanner => {
                self.state = DriverState::AwaitingHeader;
                if is_banner_line(line) {
                    debug!(banner = line, "discarding connection banner");
                    self.stats.preamble_lines += 1;
                    return Ok(());
                }
                self.await_header(line, sink)
            }
            DriverState::AwaitingHeader => self.await_header(line, sink),
            DriverState::Streaming => self.stream_line(line, sink),
            // HeaderParsed never outlives the call that entered it
            DriverState::HeaderParsed | DriverState::Done => Ok(()),
        }
    }

    /// Wrap up: fails with `NoHeader` if the input never produced one.
    pub fn finish(mut self) -> Result<ConvertStats> {
        if self.mapping.is_none() {
            return Err(ConvertError::NoHeader {
                lines_read: self.stats.lines_read,
            }
            .into());
        }
        self.state = DriverState::Done;
        Ok(self.stats)
    }

    fn await_header<W: Write>(&mut self, line: &str, sink: &mut CsvSink<W>) -> Result<()> {
        if !is_header_line(line) {
            debug!(line, "discarding line before header");
            self.stats.preamble_lines += 1;
            return Ok(());
        }

        let strategy = self.options.header_strategy;
        if strategies_disagree(line) {
            warn!(
                ?strategy,
                "header columns are not in catalog order; catalog and positional detection disagree"
            );
        }
        let mapping = parse_header(line, strategy);
        debug!(columns = ?mapping.names(), "parsed header");
        self.state = DriverState::HeaderParsed;

        self.selection = Selection::resolve(&mapping, &self.options.columns);
        self.mapping = Some(mapping);
        if self.selection.is_empty() {
            return Err(ConvertError::NoColumnsSelected.into());
        }

        if !self.options.no_headers || self.options.list_columns {
            sink.write_header(self.selection.names())?;
        }

        self.state = if self.options.list_columns {
            DriverState::Done
        } else {
            DriverState::Streaming
        };
        Ok(())
    }

    fn stream_line<W: Write>(&mut self, line: &str, sink: &mut CsvSink<W>) -> Result<()> {
        if is_header_line(line) {
            trace!("discarding repeated header");
            self.stats.repeated_headers += 1;
            return Ok(());
        }

        let tokens = tokenize_line(line);
        if tokens.is_empty() {
            return Ok(());
        }

        match self.selection.project(&tokens, self.stats.lines_read) {
            Ok(fields) => {
                sink.write_row(&fields)?;
                self.stats.rows_written += 1;
            }
            Err(e) => {
                warn!(error = %e, "skipping malformed row");
                self.stats.rows_skipped += 1;
            }
        }
        Ok(())
    }
}

/// Convert a whole mongostat stream from `input` into CSV on `output`.
///
/// Reads until end of input, or until the header row has been written when
/// only listing columns.
#[instrument(level = "debug", skip_all, fields(strategy = ?options.header_strategy))]
pub fn convert<R: BufRead, W: Write>(
    mut input: R,
    output: W,
    options: &ConvertOptions,
) -> Result<ConvertStats> {
    let mut sink = CsvSink::new(output, options.row_count);
    let mut driver = StreamDriver::new(options.clone());
    let mut buf = Vec::new();

    while !driver.is_done() {
        buf.clear();
        let n = input
            .read_until(b'\n', &mut buf)
            .context("reading mongostat input")?;
        if n == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        driver.process_line(&line, &mut sink)?;
    }

    let stats = driver.finish()?;
    sink.into_inner()?;
    info!(
        rows = stats.rows_written,
        skipped = stats.rows_skipped,
        repeated_headers = stats.repeated_headers,
        preamble = stats.preamble_lines,
        "conversion complete"
    );
    Ok(stats)
}
