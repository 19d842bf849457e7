// src/run.rs
use anyhow::Result;
use std::{io::Write, path::PathBuf};

use crate::catalog::CANONICAL_COLUMNS;
use crate::io::{open_input, open_output};
use crate::process::{
    driver::{convert, ConvertOptions, ConvertStats},
    sink::CsvSink,
};

/// Everything one invocation of the tool needs: handles to open plus
/// conversion options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunConfig {
    /// `None` reads stdin.
    pub input: Option<PathBuf>,
    /// `None` writes stdout.
    pub output: Option<PathBuf>,
    pub append: bool,
    /// Write the whole catalog and stop; no input is read.
    pub list_all_columns: bool,
    pub convert: ConvertOptions,
}

/// Write the full canonical catalog as one CSV row.
pub fn list_all_columns<W: Write>(out: W) -> Result<()> {
    let mut sink = CsvSink::new(out, false);
    sink.write_header(CANONICAL_COLUMNS)?;
    sink.into_inner()?;
    Ok(())
}

/// Open the handles described by `config` and run it.
///
/// The input is opened before the output, so a bad input path never
/// truncates an existing output file. Returns `None` when only the catalog
/// was listed.
pub fn run(config: &RunConfig) -> Result<Option<ConvertStats>> {
    if config.list_all_columns {
        let output = open_output(config.output.as_deref(), config.append)?;
        list_all_columns(output)?;
        return Ok(None);
    }

    let input = open_input(config.input.as_deref())?;
    let output = open_output(config.output.as_deref(), config.append)?;
    convert(input, output, &config.convert).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_list_all_columns() -> Result<()> {
        let mut out = Vec::new();
        list_all_columns(&mut out)?;
        assert_eq!(
            String::from_utf8(out)?,
            "insert,query,update,delete,getmore,command,flushes,mapped,vsize,res,faults,locked db,idx miss %,qr|qw,ar|aw,netIn,netOut,conn,set,repl,time\n"
        );
        Ok(())
    }

    #[test]
    fn test_list_all_columns_ignores_input() -> Result<()> {
        let tmp = tempdir()?;
        let out_path = tmp.path().join("cols.csv");
        let config = RunConfig {
            input: Some(tmp.path().join("does-not-exist.txt")),
            output: Some(out_path.clone()),
            list_all_columns: true,
            ..Default::default()
        };

        assert_eq!(run(&config)?, None);
        assert!(fs::read_to_string(&out_path)?.starts_with("insert,query,"));
        Ok(())
    }

    #[test]
    fn test_missing_input_leaves_output_untouched() -> Result<()> {
        let tmp = tempdir()?;
        let out_path = tmp.path().join("out.csv");
        fs::write(&out_path, "precious\n")?;

        let config = RunConfig {
            input: Some(tmp.path().join("missing.txt")),
            output: Some(out_path.clone()),
            ..Default::default()
        };

        let err = run(&config).unwrap_err();
        assert!(format!("{err:#}").contains("missing.txt"));
        assert_eq!(fs::read_to_string(&out_path)?, "precious\n");
        Ok(())
    }

    #[test]
    fn test_run_converts_file_to_file() -> Result<()> {
        let tmp = tempdir()?;
        let in_path = tmp.path().join("stat.txt");
        let out_path = tmp.path().join("out.csv");
        fs::write(&in_path, "insert time\n1 10:00:00\ninsert time\n2 10:00:01\n")?;

        let config = RunConfig {
            input: Some(in_path),
            output: Some(out_path.clone()),
            ..Default::default()
        };

        let stats = run(&config)?.expect("conversion stats");
        assert_eq!(stats.rows_written, 2);
        assert_eq!(stats.repeated_headers, 1);
        assert_eq!(
            fs::read_to_string(&out_path)?,
            "insert,time\n1,10:00:00\n2,10:00:01\n"
        );
        Ok(())
    }
}
