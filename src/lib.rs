pub mod catalog;
pub mod error;
pub mod io;
pub mod process;
pub mod run;

pub use catalog::{CANONICAL_COLUMNS, HEADER_MARKER};
pub use error::ConvertError;
pub use process::{
    driver::{convert, ConvertOptions, ConvertStats, StreamDriver},
    header::{parse_header, HeaderMapping, HeaderStrategy},
};
pub use run::{list_all_columns, run, RunConfig};
