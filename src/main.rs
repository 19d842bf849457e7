use anyhow::Result;
use clap::Parser;
use mongostat_csv::run;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;

use cli::Cli;

fn main() -> Result<()> {
    // ─── 1) init logging (stderr: stdout carries the CSV) ────────────
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,mongostat_csv=info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) parse arguments ──────────────────────────────────────────
    let cli = Cli::parse();
    debug!(?cli, "parsed arguments");

    // ─── 3) open handles & stream ────────────────────────────────────
    run(&cli.run_config())?;
    Ok(())
}
