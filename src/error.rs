// ⚠️ Core Errors - Recoverable conditions signalled to the caller
// The core never prints or exits; the shell decides what to do with these.

/// Errors raised while turning decoded rows into statistics
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PopulationError {
    /// A decoded record is missing a field or has a value of the wrong type
    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// birth_timezone is neither a fixed offset nor a known zone name
    #[error("Invalid timezone: '{zone}'")]
    InvalidTimezone { zone: String },
}

impl PopulationError {
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        PopulationError::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }

    pub fn invalid_timezone(zone: &str) -> Self {
        PopulationError::InvalidTimezone {
            zone: zone.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_record_message() {
        let err = PopulationError::malformed(4, "missing field 'siblings'");
        assert_eq!(
            err.to_string(),
            "Malformed record at line 4: missing field 'siblings'"
        );
    }

    #[test]
    fn test_invalid_timezone_message() {
        let err = PopulationError::invalid_timezone("Mars/Olympus");
        assert_eq!(err.to_string(), "Invalid timezone: 'Mars/Olympus'");
    }
}
