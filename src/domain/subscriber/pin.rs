//! Temporary PIN issued on registration.
//!
//! The PIN is a one-time credential the subscriber uses on first sign-in
//! through the companion channel. Encryption at rest is a collaborator
//! concern; this module only generates and carries the value.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Five-digit numeric one-time credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemporaryPin(String);

impl TemporaryPin {
    /// Generates a random five-digit PIN.
    pub fn generate() -> Self {
        let value: u32 = rand::thread_rng().gen_range(10_000..100_000);
        Self(value.to_string())
    }

    /// Reconstitutes a PIN from persistence.
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the PIN digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemporaryPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
