// 🔍 Deduplicating Loader - One record per person
// Validates raw decoder rows and keeps the first record seen for each equality key

use crate::error::PopulationError;
use crate::normalize::EqualityKey;
use crate::record::{PersonRecord, RawRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

// ============================================================================
// MALFORMED RECORD POLICY
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Fail the whole load on the first malformed record
    #[default]
    Abort,

    /// Log the malformed record, count it, and keep going
    Skip,
}

// ============================================================================
// LOAD RESULT
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    /// Raw records handed to the loader
    pub decoded: usize,

    /// Records discarded because their equality key was already taken
    pub duplicates: usize,

    /// Records skipped under MalformedPolicy::Skip
    pub malformed: usize,
}

/// Deduplicated records in first-seen order
#[derive(Debug, Clone, Default)]
pub struct Population {
    pub records: Vec<PersonRecord>,
    pub stats: LoadStats,
}

impl Population {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ============================================================================
// DEDUPLICATING LOADER
// ============================================================================

pub struct DeduplicatingLoader {
    policy: MalformedPolicy,
    seen: HashSet<EqualityKey>,
    population: Population,
}

impl DeduplicatingLoader {
    /// Create loader with the default (abort) policy
    pub fn new() -> Self {
        Self::with_policy(MalformedPolicy::default())
    }

    pub fn with_policy(policy: MalformedPolicy) -> Self {
        DeduplicatingLoader {
            policy,
            seen: HashSet::new(),
            population: Population::default(),
        }
    }

    /// Offer one raw record.
    ///
    /// Returns Ok(true) when the record was kept, Ok(false) when it was a
    /// duplicate or a skipped malformed record.
    pub fn push(&mut self, raw: RawRecord) -> Result<bool, PopulationError> {
        self.population.stats.decoded += 1;

        let person = match raw.into_person() {
            Ok(person) => person,
            Err(err) => match self.policy {
                MalformedPolicy::Abort => return Err(err),
                MalformedPolicy::Skip => {
                    warn!(error = %err, "skipping malformed record");
                    self.population.stats.malformed += 1;
                    return Ok(false);
                }
            },
        };

        Ok(self.push_person(person))
    }

    /// Offer an already validated record. Returns true if it was kept.
    pub fn push_person(&mut self, person: PersonRecord) -> bool {
        // First insertion wins; a discarded key is never re-added
        if !self.seen.insert(person.equality_key()) {
            debug!(
                first_name = person.first_name(),
                last_name = person.last_name(),
                "discarding duplicate record"
            );
            self.population.stats.duplicates += 1;
            return false;
        }

        self.population.records.push(person);
        true
    }

    pub fn finish(self) -> Population {
        self.population
    }
}

impl Default for DeduplicatingLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate and deduplicate a decoded sequence in one go
pub fn load_records<I>(
    raw_records: I,
    policy: MalformedPolicy,
) -> Result<Population, PopulationError>
where
    I: IntoIterator<Item = RawRecord>,
{
    let mut loader = DeduplicatingLoader::with_policy(policy);
    for raw in raw_records {
        loader.push(raw)?;
    }
    Ok(loader.finish())
}

// ============================================================================
// TESTS
// ============================================================================
