// 📊 Aggregator - Running totals over deduplicated records
// Sibling sum/count, favourite food frequencies, local birth month frequencies

use crate::error::PopulationError;
use crate::normalize::{birth_month, MONTHS};
use crate::record::PersonRecord;
use chrono::Month;
use std::collections::HashMap;

/// AggregateResult - Accumulator filled by one aggregation pass
///
/// Invariant: the birth month counts always sum to `total_count`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateResult {
    total_sibling_sum: u64,
    total_count: u64,
    food_frequency: HashMap<String, u64>,
    birth_month_frequency: HashMap<Month, u64>,
}

impl AggregateResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one record into the totals.
    ///
    /// The birth month is resolved before anything is touched, so a record
    /// with an unknown timezone leaves the result unchanged.
    pub fn accumulate(&mut self, record: &PersonRecord) -> Result<(), PopulationError> {
        let month = birth_month(record)?;

        self.total_sibling_sum += u64::from(record.siblings());
        self.total_count += 1;

        *self
            .food_frequency
            .entry(record.normalized_food().to_string())
            .or_insert(0) += 1;

        *self.birth_month_frequency.entry(month).or_insert(0) += 1;

        Ok(())
    }

    pub fn total_sibling_sum(&self) -> u64 {
        self.total_sibling_sum
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Normalized food -> number of people naming it
    pub fn food_frequency(&self) -> &HashMap<String, u64> {
        &self.food_frequency
    }

    pub fn food_count(&self, food: &str) -> u64 {
        self.food_frequency.get(food).copied().unwrap_or(0)
    }

    /// Month -> births; months nobody was born in have no entry
    pub fn birth_month_frequency(&self) -> &HashMap<Month, u64> {
        &self.birth_month_frequency
    }

    pub fn month_count(&self, month: Month) -> u64 {
        self.birth_month_frequency.get(&month).copied().unwrap_or(0)
    }

    /// All twelve months in calendar order, zero-filled
    pub fn months_in_order(&self) -> Vec<(Month, u64)> {
        MONTHS
            .iter()
            .map(|&month| (month, self.month_count(month)))
            .collect()
    }

    /// Average siblings rounded up; 0 for an empty result
    pub fn average_siblings(&self) -> u64 {
        if self.total_count == 0 {
            return 0;
        }
        self.total_sibling_sum.div_ceil(self.total_count)
    }
}

/// Run `accumulate` once per record
pub fn generate_result(records: &[PersonRecord]) -> Result<AggregateResult, PopulationError> {
    let mut result = AggregateResult::new();
    for record in records {
        result.accumulate(record)?;
    }
    Ok(result)
}

/// Average siblings per person, rounded toward positive infinity
pub fn average_siblings(result: &AggregateResult) -> u64 {
    result.average_siblings()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn create_test_person(
        first: &str,
        siblings: u32,
        food: &str,
        tz: &str,
        millis: i64,
    ) -> PersonRecord {
        PersonRecord::new(
            first.to_string(),
            "TEST".to_string(),
            siblings,
            food.to_string(),
            tz.to_string(),
            DateTime::<Utc>::from_timestamp_millis(millis).unwrap(),
        )
    }

    fn sample() -> Vec<PersonRecord> {
        vec![
            // 1980-02-01T01:34:54Z
            create_test_person("A", 2, "Chicken", "-05:00", 318_216_894_000),
            create_test_person("B", 3, "chicken ", "+00:00", 318_216_894_000),
            create_test_person("C", 1, "Peanut Butter", "+00:00", 655_552_800_000),
            create_test_person("D", 4, "Peanut butter", "Europe/London", 183_024_000_000),
            create_test_person("E", 0, " CHICKEN", "Asia/Tokyo", 723_524_400_000),
            create_test_person("F", 3, "Mozzarella Cheese", "+08:00", 575_841_600_000),
        ]
    }

    #[test]
    fn test_generate_result_totals() {
        let result = generate_result(&sample()).unwrap();

        assert_eq!(result.total_count(), 6);
        assert_eq!(result.total_sibling_sum(), 13);
        assert_eq!(result.food_count("chicken"), 3);
        assert_eq!(result.food_count("peanut butter"), 2);
        assert_eq!(result.food_count("mozzarella cheese"), 1);
        assert_eq!(result.food_frequency().len(), 3);
    }

    #[test]
    fn test_birth_months() {
        let result = generate_result(&sample()).unwrap();

        assert_eq!(result.month_count(Month::January), 1);
        assert_eq!(result.month_count(Month::February), 1);
        assert_eq!(result.month_count(Month::October), 2);
        assert_eq!(result.month_count(Month::December), 1);
        // 1988-03-31T20:00Z is already April 1st in +08:00
        assert_eq!(result.month_count(Month::April), 1);
        assert_eq!(result.month_count(Month::March), 0);
        assert!(!result.birth_month_frequency().contains_key(&Month::June));
    }

    #[test]
    fn test_month_counts_sum_to_total() {
        let result = generate_result(&sample()).unwrap();
        let births: u64 = result.birth_month_frequency().values().sum();
        assert_eq!(births, result.total_count());
    }

    #[test]
    fn test_average_siblings_rounds_up() {
        // 13 / 6 = 2.16..
        let result = generate_result(&sample()).unwrap();
        assert_eq!(average_siblings(&result), 3);
    }

    #[test]
    fn test_average_siblings_exact() {
        let people = vec![
            create_test_person("A", 2, "x", "Z", 0),
            create_test_person("B", 4, "x", "Z", 0),
        ];
        assert_eq!(generate_result(&people).unwrap().average_siblings(), 3);
    }

    #[test]
    fn test_empty_result() {
        let result = generate_result(&[]).unwrap();

        assert_eq!(result.average_siblings(), 0);
        assert!(result.food_frequency().is_empty());
        assert_eq!(result.months_in_order().len(), 12);
        assert!(result.months_in_order().iter().all(|(_, count)| *count == 0));
    }

    #[test]
    fn test_order_independent() {
        let mut reversed = sample();
        reversed.reverse();

        assert_eq!(
            generate_result(&sample()).unwrap(),
            generate_result(&reversed).unwrap()
        );
    }

    #[test]
    fn test_invalid_timezone_leaves_result_untouched() {
        let mut result = AggregateResult::new();
        result.accumulate(&sample()[0]).unwrap();
        let before = result.clone();

        let bad = create_test_person("Z", 9, "Tofu", "Atlantis/Capital", 0);
        let err = result.accumulate(&bad).unwrap_err();

        assert!(matches!(err, PopulationError::InvalidTimezone { .. }));
        assert_eq!(result, before);
    }

    #[test]
    fn test_months_in_order() {
        let result = generate_result(&sample()).unwrap();
        let months = result.months_in_order();

        assert_eq!(months[0], (Month::January, 1));
        assert_eq!(months[9], (Month::October, 2));
        assert_eq!(months[11], (Month::December, 1));
    }
}
