// 🧍 Person Records - Raw decoded rows and validated, immutable records

use crate::error::PopulationError;
use crate::normalize::{normalized_food, EqualityKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// FIELD NAMES
// ============================================================================

pub const FIRST_NAME: &str = "first_name";
pub const LAST_NAME: &str = "last_name";
pub const SIBLINGS: &str = "siblings";
pub const FAVOURITE_FOOD: &str = "favourite_food";
pub const BIRTH_TIMEZONE: &str = "birth_timezone";
pub const BIRTH_TIMESTAMP: &str = "birth_timestamp";

/// Column order of the reference CSV layout
pub const FIELD_ORDER: [&str; 6] = [
    FIRST_NAME,
    LAST_NAME,
    SIBLINGS,
    FAVOURITE_FOOD,
    BIRTH_TIMEZONE,
    BIRTH_TIMESTAMP,
];

// ============================================================================
// RAW RECORD
// ============================================================================

/// RawRecord - Output of a decoder, before any validation
///
/// Every field is optional and textual: CSV cells and JSON scalars both land
/// here so that the loader applies one validation rule to every format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub siblings: Option<String>,
    pub favourite_food: Option<String>,
    pub birth_timezone: Option<String>,
    pub birth_timestamp: Option<String>,

    /// Line in the source file (CSV) or 1-based array position (JSON)
    pub line_number: usize,
}

impl RawRecord {
    pub fn new(line_number: usize) -> Self {
        RawRecord {
            line_number,
            ..Default::default()
        }
    }

    /// Set a field by its column name; unknown names are ignored
    pub fn set_field(&mut self, name: &str, value: String) {
        let slot = match name {
            FIRST_NAME => &mut self.first_name,
            LAST_NAME => &mut self.last_name,
            SIBLINGS => &mut self.siblings,
            FAVOURITE_FOOD => &mut self.favourite_food,
            BIRTH_TIMEZONE => &mut self.birth_timezone,
            BIRTH_TIMESTAMP => &mut self.birth_timestamp,
            _ => return,
        };
        *slot = Some(value);
    }

    /// Builder pattern: set a field and return self
    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.set_field(name, value.to_string());
        self
    }

    /// Validate the raw fields and build an immutable PersonRecord
    pub fn into_person(self) -> Result<PersonRecord, PopulationError> {
        let line = self.line_number;

        let first_name = require(line, FIRST_NAME, self.first_name)?;
        let last_name = require(line, LAST_NAME, self.last_name)?;
        let siblings_raw = require(line, SIBLINGS, self.siblings)?;
        let favourite_food = require(line, FAVOURITE_FOOD, self.favourite_food)?;
        let birth_timezone = require(line, BIRTH_TIMEZONE, self.birth_timezone)?;
        let timestamp_raw = require(line, BIRTH_TIMESTAMP, self.birth_timestamp)?;

        let siblings = siblings_raw.trim().parse::<u32>().map_err(|_| {
            PopulationError::malformed(
                line,
                format!("siblings must be a non-negative integer, got '{}'", siblings_raw),
            )
        })?;

        let millis = timestamp_raw.trim().parse::<i64>().map_err(|_| {
            PopulationError::malformed(
                line,
                format!("birth_timestamp must be epoch milliseconds, got '{}'", timestamp_raw),
            )
        })?;

        let birth_instant = DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(|| {
            PopulationError::malformed(line, format!("birth_timestamp out of range: {}", millis))
        })?;

        Ok(PersonRecord::new(
            first_name,
            last_name,
            siblings,
            favourite_food,
            birth_timezone,
            birth_instant,
        ))
    }
}

fn require(line: usize, field: &str, value: Option<String>) -> Result<String, PopulationError> {
    value.ok_or_else(|| PopulationError::malformed(line, format!("missing field '{}'", field)))
}

// ============================================================================
// PERSON RECORD
// ============================================================================

/// PersonRecord - One person, immutable once constructed
///
/// The normalized favourite food is derived once here and carried as plain
/// data, so equality and aggregation never recompute it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonRecord {
    first_name: String,
    last_name: String,
    siblings: u32,
    favourite_food: String,
    normalized_food: String,
    birth_timezone: String,
    birth_instant: DateTime<Utc>,
}

impl PersonRecord {
    pub fn new(
        first_name: String,
        last_name: String,
        siblings: u32,
        favourite_food: String,
        birth_timezone: String,
        birth_instant: DateTime<Utc>,
    ) -> Self {
        let normalized_food = normalized_food(&favourite_food);
        PersonRecord {
            first_name,
            last_name,
            siblings,
            favourite_food,
            normalized_food,
            birth_timezone,
            birth_instant,
        }
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn siblings(&self) -> u32 {
        self.siblings
    }

    /// Favourite food exactly as it appeared in the input
    pub fn favourite_food(&self) -> &str {
        &self.favourite_food
    }

    /// Trimmed, lowercased favourite food
    pub fn normalized_food(&self) -> &str {
        &self.normalized_food
    }

    pub fn birth_timezone(&self) -> &str {
        &self.birth_timezone
    }

    pub fn birth_instant(&self) -> DateTime<Utc> {
        self.birth_instant
    }

    /// Birth instant as epoch milliseconds
    pub fn birth_timestamp(&self) -> i64 {
        self.birth_instant.timestamp_millis()
    }

    /// Copy of this record placed in another birth timezone
    pub fn with_birth_timezone(&self, birth_timezone: &str) -> Self {
        PersonRecord {
            birth_timezone: birth_timezone.to_string(),
            ..self.clone()
        }
    }

    /// Key under which two records count as the same person
    pub fn equality_key(&self) -> EqualityKey {
        EqualityKey {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            siblings: self.siblings,
            normalized_food: self.normalized_food.clone(),
            birth_timezone: self.birth_timezone.clone(),
            birth_timestamp: self.birth_timestamp(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_raw(siblings: &str, food: &str) -> RawRecord {
        RawRecord::new(2)
            .with_field(FIRST_NAME, "DAVID")
            .with_field(LAST_NAME, "XU")
            .with_field(SIBLINGS, siblings)
            .with_field(FAVOURITE_FOOD, food)
            .with_field(BIRTH_TIMEZONE, "-05:00")
            .with_field(BIRTH_TIMESTAMP, "318216894000")
    }

    #[test]
    fn test_into_person_valid() {
        let person = create_raw("2", " Chicken ").into_person().unwrap();

        assert_eq!(person.first_name(), "DAVID");
        assert_eq!(person.siblings(), 2);
        assert_eq!(person.favourite_food(), " Chicken ");
        assert_eq!(person.normalized_food(), "chicken");
        assert_eq!(person.birth_timestamp(), 318_216_894_000);
    }

    #[test]
    fn test_into_person_missing_field() {
        let mut raw = create_raw("2", "Chicken");
        raw.last_name = None;

        let err = raw.into_person().unwrap_err();
        assert_eq!(err, PopulationError::malformed(2, "missing field 'last_name'"));
    }

    #[test]
    fn test_into_person_non_numeric_siblings() {
        let err = create_raw("two", "Chicken").into_person().unwrap_err();
        assert!(matches!(err, PopulationError::MalformedRecord { line: 2, .. }));
    }

    #[test]
    fn test_into_person_negative_siblings() {
        let err = create_raw("-1", "Chicken").into_person().unwrap_err();
        assert!(matches!(err, PopulationError::MalformedRecord { .. }));
    }

    #[test]
    fn test_into_person_siblings_with_padding() {
        let person = create_raw(" 4 ", "Chicken").into_person().unwrap();
        assert_eq!(person.siblings(), 4);
    }

    #[test]
    fn test_into_person_bad_timestamp() {
        let raw = create_raw("1", "Chicken").with_field(BIRTH_TIMESTAMP, "yesterday");
        assert!(raw.into_person().is_err());
    }

    #[test]
    fn test_set_field_ignores_unknown_column() {
        let mut raw = RawRecord::new(1);
        raw.set_field("middle_name", "Q".to_string());
        assert_eq!(raw, RawRecord::new(1));
    }

    #[test]
    fn test_equality_key_ignores_food_casing() {
        let a = create_raw("2", "Chicken").into_person().unwrap();
        let b = create_raw("2", "  CHICKEN").into_person().unwrap();

        assert_ne!(a, b);
        assert_eq!(a.equality_key(), b.equality_key());
    }

    #[test]
    fn test_equality_key_respects_timezone() {
        let a = create_raw("2", "Chicken").into_person().unwrap();
        let b = a.with_birth_timezone("+00:00");

        assert_eq!(b.birth_timezone(), "+00:00");
        assert_eq!(a.birth_timezone(), "-05:00");
        assert_ne!(a.equality_key(), b.equality_key());
    }
}
