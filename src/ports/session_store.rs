//! Session store port.
//!
//! Persists one level integer per gateway session id. Level 0 means no
//! record yet; rows are never deleted, the gateway does not reuse ids.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SessionId};

/// Persistence contract for the per-session menu level.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Current level for the session; 0 when no record exists.
    ///
    /// Never fails on a missing key.
    async fn level(&self, session_id: &SessionId) -> Result<u32, DomainError>;

    /// Atomically advances the level from `expected` to `next`.
    ///
    /// One conditional update: overwrites when the stored level equals
    /// `expected`, otherwise leaves the row untouched and returns false.
    /// Callers move a fresh session through [`SessionStore::reset`] before
    /// advancing it, so `expected` is always at least 1 and the row
    /// exists. Two concurrent turns for the same session can never both
    /// advance from the same level, which is what makes terminal domain
    /// effects at-most-once.
    async fn try_advance(
        &self,
        session_id: &SessionId,
        expected: u32,
        next: u32,
    ) -> Result<bool, DomainError>;

    /// Unconditionally moves the session to level 1 (root menu shown).
    async fn reset(&self, session_id: &SessionId) -> Result<(), DomainError>;
}
