//! Subscriber phone number value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Number of trailing digits used as the canonical lookup key.
///
/// Gateways deliver the same subscriber as `+250781234567`, `250781234567`
/// or `0781234567` depending on the network; the last nine digits are
/// stable across all three renderings.
const KEY_DIGITS: usize = 9;

/// Phone number in gateway format, with a normalized lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Msisdn {
    raw: String,
    key: String,
}

impl Msisdn {
    /// Parses a gateway-format phone number.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the value is blank
    /// - `InvalidFormat` if fewer than nine digits remain after stripping
    ///   punctuation
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(ValidationError::empty_field("phone_number"));
        }

        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() < KEY_DIGITS {
            return Err(ValidationError::invalid_format(
                "phone_number",
                "fewer than nine digits",
            ));
        }

        let key = digits[digits.len() - KEY_DIGITS..].to_string();
        Ok(Self { raw, key })
    }

    /// Returns the number exactly as the gateway sent it.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the last-nine-digit lookup key.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for Msisdn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
