use thiserror::Error;

/// Conversion failures callers may want to tell apart.
///
/// `ShortRow` is row-level: the driver logs it and keeps streaming. The other
/// variants end the conversion.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConvertError {
    #[error("no recognizable header found in {lines_read} line(s) of input")]
    NoHeader { lines_read: u64 },

    #[error("none of the requested columns are present in the mongostat output")]
    NoColumnsSelected,

    #[error("line {line}: row has {found} field(s) but the selection needs {needed}")]
    ShortRow {
        line: u64,
        needed: usize,
        found: usize,
    },
}
