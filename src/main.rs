use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use population_stats::{run, MalformedPolicy, OutputFormat, RunConfig, DEFAULT_TOP_FOODS};

/// Average siblings, favourite foods and birth months of a population file
#[derive(Debug, Parser)]
#[command(name = "population-stats", version)]
struct Cli {
    /// Path to a .csv, .json, .csv.gz or .json.gz file
    input: PathBuf,

    /// Number of favourite foods to report
    #[arg(long, env = "POPULATION_STATS_TOP", default_value_t = DEFAULT_TOP_FOODS)]
    top: usize,

    /// Skip malformed records instead of failing
    #[arg(long, env = "POPULATION_STATS_SKIP_MALFORMED")]
    skip_malformed: bool,

    /// Output format
    #[arg(long, value_enum, env = "POPULATION_STATS_FORMAT", default_value_t = Format::Text)]
    format: Format,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        }
    }
}

impl Cli {
    fn into_config(self) -> RunConfig {
        let malformed = if self.skip_malformed {
            MalformedPolicy::Skip
        } else {
            MalformedPolicy::Abort
        };

        RunConfig::new(self.input)
            .with_top_foods(self.top)
            .with_malformed(malformed)
            .with_output(self.format.into())
    }
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries only the report
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let config = Cli::parse().into_config();
    let report = run(&config)?;

    print!("{}", report.render(config.output)?);

    Ok(())
}
