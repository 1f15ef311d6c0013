// Booking configuration
//
// Built once at startup from environment variables and threaded through
// AppState into the services. There is no ambient global settings object;
// everything that tunes booking behavior lives here.

use regex::Regex;

/// Default mobile-number pattern (mainland China format, as deployed).
const DEFAULT_PHONE_PATTERN: &str = r"^1[3-9]\d{9}$";

/// Tunable booking parameters.
#[derive(Debug, Clone)]
pub struct BookingConfig {
    /// Step between candidate slot start times, in minutes
    pub slot_minutes: u32,
    /// Pattern a customer phone number must match
    pub phone_pattern: Regex,
    /// Attempts to generate a non-colliding appointment code
    pub code_max_attempts: u32,
    /// Attempts to commit a booking when the slot index reports a conflict
    pub booking_retry_attempts: u32,
}

impl BookingConfig {
    /// Build configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable.
    ///
    /// Recognized variables: `SLOT_MINUTES`, `PHONE_PATTERN`,
    /// `CODE_MAX_ATTEMPTS`, `BOOKING_RETRY_ATTEMPTS`.
    pub fn from_env() -> Self {
        let slot_minutes = std::env::var("SLOT_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&m| m > 0)
            .unwrap_or(30);

        let phone_pattern = std::env::var("PHONE_PATTERN")
            .ok()
            .and_then(|p| Regex::new(&p).ok())
            .unwrap_or_else(|| Regex::new(DEFAULT_PHONE_PATTERN).unwrap());

        let code_max_attempts = std::env::var("CODE_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let booking_retry_attempts = std::env::var("BOOKING_RETRY_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3);

        Self {
            slot_minutes,
            phone_pattern,
            code_max_attempts,
            booking_retry_attempts,
        }
    }

    /// Check a phone number against the configured pattern
    pub fn is_valid_phone(&self, phone: &str) -> bool {
        self.phone_pattern.is_match(phone)
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            slot_minutes: 30,
            phone_pattern: Regex::new(DEFAULT_PHONE_PATTERN).unwrap(),
            code_max_attempts: 10,
            booking_retry_attempts: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BookingConfig::default();
        assert_eq!(config.slot_minutes, 30);
        assert_eq!(config.code_max_attempts, 10);
        assert_eq!(config.booking_retry_attempts, 3);
    }

    #[test]
    fn test_default_phone_pattern_accepts_valid_numbers() {
        let config = BookingConfig::default();
        assert!(config.is_valid_phone("13812345678"));
        assert!(config.is_valid_phone("19900000000"));
    }

    #[test]
    fn test_default_phone_pattern_rejects_invalid_numbers() {
        let config = BookingConfig::default();
        assert!(!config.is_valid_phone("12812345678")); // bad second digit
        assert!(!config.is_valid_phone("1381234567")); // too short
        assert!(!config.is_valid_phone("138123456789")); // too long
        assert!(!config.is_valid_phone("abcdefghijk"));
        assert!(!config.is_valid_phone(""));
    }

    #[test]
    fn test_custom_pattern() {
        let config = BookingConfig {
            phone_pattern: Regex::new(r"^\d{10}$").unwrap(),
            ..BookingConfig::default()
        };
        assert!(config.is_valid_phone("0123456789"));
        assert!(!config.is_valid_phone("13812345678"));
    }
}
