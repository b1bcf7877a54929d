// ⚙️ Run Configuration - What the shell passes to the pipeline

use crate::deduplication::MalformedPolicy;
use crate::report::OutputFormat;
use crate::top_foods::DEFAULT_TOP_FOODS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Input file (.csv, .json, .csv.gz, .json.gz)
    pub input: PathBuf,

    /// How many favourite foods to report
    #[serde(default = "default_top_foods")]
    pub top_foods: usize,

    #[serde(default)]
    pub malformed: MalformedPolicy,

    #[serde(default)]
    pub output: OutputFormat,
}

fn default_top_foods() -> usize {
    DEFAULT_TOP_FOODS
}

impl RunConfig {
    /// Defaults for everything but the input path
    pub fn new(input: impl AsRef<Path>) -> Self {
        RunConfig {
            input: input.as_ref().to_path_buf(),
            top_foods: DEFAULT_TOP_FOODS,
            malformed: MalformedPolicy::default(),
            output: OutputFormat::default(),
        }
    }

    /// Builder pattern: set the malformed record policy
    pub fn with_malformed(mut self, malformed: MalformedPolicy) -> Self {
        self.malformed = malformed;
        self
    }

    /// Builder pattern: set the number of foods reported
    pub fn with_top_foods(mut self, top_foods: usize) -> Self {
        self.top_foods = top_foods;
        self
    }

    /// Builder pattern: set the output format
    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }
}
