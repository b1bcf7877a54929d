// 🧹 Record Normalizer - Canonical food names, equality keys, local birth dates
//
// Two derived values drive every statistic:
// 1. The equality key (dedup) built around the normalized favourite food
// 2. The local birth date/time, read in the person's own birth timezone

use crate::error::PopulationError;
use crate::record::PersonRecord;
use chrono::{DateTime, Datelike, FixedOffset, Month, NaiveDateTime, Offset, Utc};
use chrono_tz::Tz;
use serde::Serialize;

/// Calendar order, January first
pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Largest fixed offset accepted, in seconds (±18:00)
const MAX_OFFSET_SECONDS: i32 = 18 * 3600;

// ============================================================================
// FOOD NORMALIZATION
// ============================================================================

/// Trim surrounding whitespace, then lowercase.
///
/// "Steak", "steak " and " STEAK" all normalize to "steak".
pub fn normalized_food(food: &str) -> String {
    food.trim().to_lowercase()
}

// ============================================================================
// EQUALITY KEY
// ============================================================================

/// Fields that identify a person. Two records with the same key are duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EqualityKey {
    pub first_name: String,
    pub last_name: String,
    pub siblings: u32,
    pub normalized_food: String,
    pub birth_timezone: String,
    pub birth_timestamp: i64,
}

// ============================================================================
// BIRTH TIMEZONE
// ============================================================================

/// A resolved birth timezone
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BirthZone {
    /// Fixed UTC offset such as "+05:30" or "GMT-3"
    Fixed(FixedOffset),

    /// Zone database entry such as "America/Toronto"
    Named(Tz),
}

impl BirthZone {
    /// Resolve a zone identifier.
    ///
    /// Accepts "Z", signed offsets (±H, ±HH, ±HHMM, ±HHMMSS, ±HH:MM, ±HH:MM:SS),
    /// the same offsets behind a UTC/GMT/UT prefix, and IANA zone names.
    pub fn parse(zone: &str) -> Result<Self, PopulationError> {
        let id = zone.trim();

        if id == "Z" {
            return Ok(BirthZone::Fixed(utc_offset()));
        }

        if id.starts_with('+') || id.starts_with('-') {
            return parse_offset(id)
                .map(BirthZone::Fixed)
                .ok_or_else(|| PopulationError::invalid_timezone(zone));
        }

        // "UT" last so it does not shadow "UTC"
        for prefix in ["UTC", "GMT", "UT"] {
            if let Some(rest) = id.strip_prefix(prefix) {
                if rest.is_empty() {
                    return Ok(BirthZone::Fixed(utc_offset()));
                }
                if rest.starts_with('+') || rest.starts_with('-') {
                    return parse_offset(rest)
                        .map(BirthZone::Fixed)
                        .ok_or_else(|| PopulationError::invalid_timezone(zone));
                }
            }
        }

        id.parse::<Tz>()
            .map(BirthZone::Named)
            .map_err(|_| PopulationError::invalid_timezone(zone))
    }

    /// Wall-clock date/time of an instant in this zone
    pub fn local(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        match self {
            BirthZone::Fixed(offset) => instant.with_timezone(offset).naive_local(),
            BirthZone::Named(tz) => instant.with_timezone(tz).naive_local(),
        }
    }
}

fn utc_offset() -> FixedOffset {
    Utc.fix()
}

/// Parse "+HH:MM"-style offsets. Returns None for anything malformed or
/// beyond ±18:00.
fn parse_offset(text: &str) -> Option<FixedOffset> {
    let (sign, body) = match text.chars().next()? {
        '+' => (1, &text[1..]),
        '-' => (-1, &text[1..]),
        _ => return None,
    };

    if body.is_empty() || !body.chars().all(|c| c.is_ascii_digit() || c == ':') {
        return None;
    }

    let parts: Vec<&str> = body.split(':').collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [compact] => match compact.len() {
            1 | 2 => (compact.parse::<i32>().ok()?, 0, 0),
            4 => (compact[..2].parse().ok()?, compact[2..].parse().ok()?, 0),
            6 => (
                compact[..2].parse().ok()?,
                compact[2..4].parse().ok()?,
                compact[4..].parse().ok()?,
            ),
            _ => return None,
        },
        [h, m] if h.len() == 2 && m.len() == 2 => (h.parse().ok()?, m.parse().ok()?, 0),
        [h, m, s] if h.len() == 2 && m.len() == 2 && s.len() == 2 => {
            (h.parse().ok()?, m.parse().ok()?, s.parse().ok()?)
        }
        _ => return None,
    };

    if minutes >= 60 || seconds >= 60 {
        return None;
    }

    let total = hours * 3600 + minutes * 60 + seconds;
    if total > MAX_OFFSET_SECONDS {
        return None;
    }

    FixedOffset::east_opt(sign * total)
}

// ============================================================================
// LOCAL BIRTH DATE
// ============================================================================

/// Birth instant converted to wall-clock time in the record's birth timezone
pub fn local_birth_datetime(record: &PersonRecord) -> Result<NaiveDateTime, PopulationError> {
    let zone = BirthZone::parse(record.birth_timezone())?;
    Ok(zone.local(record.birth_instant()))
}

/// Calendar month of the local birth date
pub fn birth_month(record: &PersonRecord) -> Result<Month, PopulationError> {
    let local = local_birth_datetime(record)?;
    Ok(MONTHS[local.month0() as usize])
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    // 1980-02-01T01:34:54Z
    const DAVID_BIRTH_MS: i64 = 318_216_894_000;

    fn create_person(timezone: &str, millis: i64) -> PersonRecord {
        PersonRecord::new(
            "DAVID".to_string(),
            "XU".to_string(),
            2,
            "Chicken".to_string(),
            timezone.to_string(),
            DateTime::<Utc>::from_timestamp_millis(millis).unwrap(),
        )
    }

    #[test]
    fn test_normalized_food_trims_and_lowercases() {
        assert_eq!(normalized_food("Steak"), "steak");
        assert_eq!(normalized_food("steak "), "steak");
        assert_eq!(normalized_food(" STEAK"), "steak");
        assert_eq!(normalized_food("\tPeanut Butter\n"), "peanut butter");
    }

    #[test]
    fn test_normalized_food_empty() {
        assert_eq!(normalized_food(""), "");
        assert_eq!(normalized_food("   "), "");
    }

    #[test]
    fn test_timezone_shifts_month_back() {
        let david = create_person("-05:00", DAVID_BIRTH_MS);
        let local = local_birth_datetime(&david).unwrap();

        assert_eq!(local.date(), NaiveDate::from_ymd_opt(1980, 1, 31).unwrap());
        assert_eq!(local.hour(), 20);
        assert_eq!(birth_month(&david).unwrap(), Month::January);
    }

    #[test]
    fn test_timezone_utc_keeps_month() {
        let david = create_person("-05:00", DAVID_BIRTH_MS).with_birth_timezone("+00:00");
        assert_eq!(birth_month(&david).unwrap(), Month::February);
    }

    #[test]
    fn test_named_zone() {
        // Toronto is UTC-5 in winter
        let david = create_person("America/Toronto", DAVID_BIRTH_MS);
        assert_eq!(birth_month(&david).unwrap(), Month::January);

        let tokyo = david.with_birth_timezone("Asia/Tokyo");
        let local = local_birth_datetime(&tokyo).unwrap();
        assert_eq!(local.hour(), 10);
        assert_eq!(local.month(), 2);
    }

    #[test]
    fn test_parse_offset_forms() {
        let expect = |zone: &str, seconds: i32| {
            assert_eq!(
                BirthZone::parse(zone).unwrap(),
                BirthZone::Fixed(FixedOffset::east_opt(seconds).unwrap()),
                "zone {}",
                zone
            );
        };

        expect("Z", 0);
        expect("+00:00", 0);
        expect("-05:00", -5 * 3600);
        expect("+5", 5 * 3600);
        expect("+0530", 5 * 3600 + 30 * 60);
        expect("+05:30:15", 5 * 3600 + 30 * 60 + 15);
        expect("-123456", -(12 * 3600 + 34 * 60 + 56));
        expect("UTC", 0);
        expect("GMT+02:00", 2 * 3600);
        expect("UT-03", -3 * 3600);
        expect("+18:00", 18 * 3600);
    }

    #[test]
    fn test_parse_rejects_bad_zones() {
        let zones = [
            "", "+", "+5:00", "+19:00", "+05:60", "+123", "Mars/Olympus", "GMT+x", "EST5EDT+",
        ];
        for zone in zones {
            let err = BirthZone::parse(zone).unwrap_err();
            assert_eq!(err, PopulationError::invalid_timezone(zone), "zone {}", zone);
        }
    }

    #[test]
    fn test_invalid_timezone_propagates() {
        let person = create_person("Nowhere/Special", DAVID_BIRTH_MS);
        assert!(matches!(
            birth_month(&person),
            Err(PopulationError::InvalidTimezone { .. })
        ));
    }

    #[test]
    fn test_months_calendar_order() {
        assert_eq!(MONTHS[0], Month::January);
        assert_eq!(MONTHS[11], Month::December);
        for (i, month) in MONTHS.iter().enumerate() {
            assert_eq!(month.number_from_month() as usize, i + 1);
        }
    }
}
