//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Opaque session identifier assigned by the USSD gateway.
///
/// The gateway guarantees uniqueness per dialog; the backend treats the
/// value as an opaque key and never parses it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Creates a session id from the gateway-supplied string.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the value is blank
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(ValidationError::empty_field("session_id"));
        }
        Ok(Self(raw))
    }

    /// Returns the raw gateway value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Database-assigned identifier for a subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriberId(i64);

impl SubscriberId {
    /// Wraps a database-assigned id.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the inner integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Database-assigned identifier for a pickup booking (claim).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimId(i64);

impl ClaimId {
    /// Wraps a database-assigned id.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Parses a claim id from subscriber-typed menu input.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if the input is not a positive integer
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        match trimmed.parse::<i64>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(ValidationError::invalid_format(
                "booking_id",
                "must be a positive number",
            )),
        }
    }

    /// Returns the inner integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// National identity number, used to reference both subscribers and
/// deceased subjects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NationalId(String);

impl NationalId {
    const MIN_DIGITS: usize = 5;
    const MAX_DIGITS: usize = 16;

    /// Parses a national id from subscriber-typed menu input.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if the input is not 5-16 digits
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let digits_only = trimmed.chars().all(|c| c.is_ascii_digit());
        if !digits_only || trimmed.len() < Self::MIN_DIGITS || trimmed.len() > Self::MAX_DIGITS {
            return Err(ValidationError::invalid_format(
                "national_id",
                "must be 5-16 digits",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the digit string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NationalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
