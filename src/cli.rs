use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use mongostat_csv::{ConvertOptions, HeaderStrategy, RunConfig};

#[derive(Debug, Parser)]
#[command(name = "mongostat-csv")]
#[command(
    version,
    about = "Parse the output of mongostat into a CSV file",
    long_about = None
)]
pub struct Cli {
    /// Output file to write to (default is stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Append to the file given by --output instead of overwriting it
    #[arg(long)]
    pub append: bool,

    /// Don't write the header row (useful with --append)
    #[arg(long)]
    pub noheaders: bool,

    /// Input file to read from (default is stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Only output this column; repeat to output several, in command-line order
    #[arg(short, long = "columns", value_name = "NAME")]
    pub columns: Vec<String>,

    /// Add a leading column numbering each row of output
    #[arg(long)]
    pub rowcount: bool,

    /// List the canonical column headings and exit
    #[arg(long)]
    pub listallcolumns: bool,

    /// List the columns present in this input and exit
    #[arg(long)]
    pub listcolumns: bool,

    /// How header names are mapped to field positions
    #[arg(long, value_enum, default_value_t = StrategyArg::Positional)]
    pub header_strategy: StrategyArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Left-to-right order of the header text
    Positional,
    /// Fixed catalog order (legacy behaviour)
    Catalog,
}

impl From<StrategyArg> for HeaderStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Positional => HeaderStrategy::Positional,
            StrategyArg::Catalog => HeaderStrategy::Catalog,
        }
    }
}

impl Cli {
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            columns: self.columns.clone(),
            no_headers: self.noheaders,
            row_count: self.rowcount,
            list_columns: self.listcolumns,
            header_strategy: self.header_strategy.into(),
        }
    }

    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            input: self.input.clone(),
            output: self.output.clone(),
            append: self.append,
            list_all_columns: self.listallcolumns,
            convert: self.convert_options(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_columns_keep_order() {
        let cli = Cli::parse_from([
            "mongostat-csv",
            "--columns",
            "time",
            "-c",
            "locked db",
            "--rowcount",
        ]);
        let opts = cli.convert_options();
        assert_eq!(opts.columns, vec!["time", "locked db"]);
        assert!(opts.row_count);
        assert_eq!(opts.header_strategy, HeaderStrategy::Positional);
    }

    #[test]
    fn test_run_config_carries_handles() {
        let cli = Cli::parse_from([
            "mongostat-csv",
            "-i",
            "stat.txt",
            "-o",
            "out.csv",
            "--append",
            "--noheaders",
        ]);
        let config = cli.run_config();
        assert_eq!(config.input.as_deref(), Some(std::path::Path::new("stat.txt")));
        assert_eq!(config.output.as_deref(), Some(std::path::Path::new("out.csv")));
        assert!(config.append);
        assert!(!config.list_all_columns);
        assert!(config.convert.no_headers);
    }

    #[test]
    fn test_catalog_strategy_flag() {
        let cli = Cli::parse_from(["mongostat-csv", "--header-strategy", "catalog"]);
        assert_eq!(cli.convert_options().header_strategy, HeaderStrategy::Catalog);
    }

    #[test]
    fn test_cli_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
