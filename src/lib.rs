// Population Stats - Core Library
// Exposes all modules for use in the CLI and tests

pub mod aggregate;
pub mod config;
pub mod deduplication;
pub mod error;
pub mod normalize;
pub mod parser;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod top_foods;

// Re-export commonly used types
pub use aggregate::{average_siblings, generate_result, AggregateResult};
pub use config::RunConfig;
pub use deduplication::{
    load_records, DeduplicatingLoader, LoadStats, MalformedPolicy, Population,
};
pub use error::PopulationError;
pub use normalize::{
    birth_month, local_birth_datetime, normalized_food, BirthZone, EqualityKey, MONTHS,
};
pub use parser::{
    decode_file, detect_format, get_decoder, open_input,
    CsvDecoder, InputFormat, JsonDecoder, RecordDecoder, SourceFormat,
};
pub use pipeline::{load_population, run, run_file};
pub use record::{PersonRecord, RawRecord};
pub use report::{FoodCount, MonthCount, OutputFormat, PopulationReport};
pub use top_foods::{top_food_counts, top_foods, DEFAULT_TOP_FOODS};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
