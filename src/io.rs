// src/io.rs
use anyhow::{Context, Result};
use std::{
    fs::{File, OpenOptions},
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::Path,
};

/// Open the mongostat input: the named file, or stdin when `path` is `None`.
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(p) => {
            let file =
                File::open(p).with_context(|| format!("opening input file {}", p.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

/// Open the CSV output: the named file (truncated, or appended to with
/// `append`), or stdout when `path` is `None`.
pub fn open_output(path: Option<&Path>, append: bool) -> Result<Box<dyn Write>> {
    match path {
        Some(p) => {
            let mut opts = OpenOptions::new();
            if append {
                opts.append(true).create(true);
            } else {
                opts.write(true).create(true).truncate(true);
            }
            let file = opts
                .open(p)
                .with_context(|| format!("opening output file {}", p.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout())),
    }
}
