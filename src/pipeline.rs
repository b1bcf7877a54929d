// 🔄 Pipeline - decode → dedupe → aggregate → select → report
// Single-threaded, one input file per run

use crate::aggregate::generate_result;
use crate::config::RunConfig;
use crate::deduplication::{load_records, Population};
use crate::parser::decode_file;
use crate::report::PopulationReport;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Decode and deduplicate one input file
pub fn load_population(config: &RunConfig) -> Result<Population> {
    let raw_records = decode_file(&config.input)?;
    info!(records = raw_records.len(), "decoded input");

    let population = load_records(raw_records, config.malformed)
        .with_context(|| format!("Failed to load {}", config.input.display()))?;

    info!(
        unique = population.len(),
        duplicates = population.stats.duplicates,
        malformed = population.stats.malformed,
        "deduplicated population"
    );

    Ok(population)
}

/// Run the whole pipeline and build the report
pub fn run(config: &RunConfig) -> Result<PopulationReport> {
    let population = load_population(config)?;

    let result = generate_result(&population.records)
        .with_context(|| format!("Failed to aggregate {}", config.input.display()))?;

    Ok(PopulationReport::from_result(&result, config.top_foods))
}

/// Default configuration for a path
pub fn run_file(path: &Path) -> Result<PopulationReport> {
    run(&RunConfig::new(path))
}
