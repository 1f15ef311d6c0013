// Validation utilities module
// Provides custom validation functions for domain-specific rules

use validator::ValidationError;

/// Validates that a time string is well-formed 24-hour `HH:MM`
pub fn validate_hhmm(time: &str) -> Result<(), ValidationError> {
    let mut parts = time.split(':');
    let (Some(h), Some(m), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ValidationError::new("invalid_time_format"));
    };
    let ok = h.len() == 2
        && m.len() == 2
        && h.parse::<u32>().map(|h| h < 24).unwrap_or(false)
        && m.parse::<u32>().map(|m| m < 60).unwrap_or(false);
    if ok {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_time_format"))
    }
}

/// Validates that a service duration is positive (for required i32 fields)
pub fn validate_positive_duration(minutes: i32) -> Result<(), ValidationError> {
    if minutes <= 0 {
        Err(ValidationError::new("duration_must_be_positive"))
    } else {
        Ok(())
    }
}

/// Validates that a weekday index is in 0..=6 (Sunday-based, as stored)
pub fn validate_weekday(weekday: i16) -> Result<(), ValidationError> {
    if (0..=6).contains(&weekday) {
        Ok(())
    } else {
        Err(ValidationError::new("weekday_out_of_range"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_times() {
        for t in ["00:00", "09:30", "12:00", "23:59"] {
            assert!(validate_hhmm(t).is_ok(), "{} should be valid", t);
        }
    }

    #[test]
    fn test_invalid_times() {
        for t in ["24:00", "9:30", "09:60", "0930", "09:30:00", "ab:cd", ""] {
            assert!(validate_hhmm(t).is_err(), "{} should be invalid", t);
        }
    }

    #[test]
    fn test_duration_validation() {
        assert!(validate_positive_duration(30).is_ok());
        assert!(validate_positive_duration(45).is_ok());
        assert!(validate_positive_duration(0).is_err());
        assert!(validate_positive_duration(-15).is_err());
    }

    #[test]
    fn test_weekday_validation() {
        assert!(validate_weekday(0).is_ok());
        assert!(validate_weekday(6).is_ok());
        assert!(validate_weekday(7).is_err());
        assert!(validate_weekday(-1).is_err());
    }
}
