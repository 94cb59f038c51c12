//! Claim repository port (write side).

use async_trait::async_trait;

use crate::domain::claim::NewClaim;
use crate::domain::foundation::{ClaimId, DomainError, SubscriberId};

/// Persistence contract for booking writes.
#[async_trait]
pub trait ClaimRepository: Send + Sync {
    /// Books a pickup: inserts the claim and marks the subject claimed as
    /// one atomic unit.
    ///
    /// Implementations must guard the subject flip with its current
    /// `unclaimed` status so that of two concurrent bookings for the same
    /// subject exactly one succeeds.
    ///
    /// # Errors
    ///
    /// - `SubjectNotFound` when the subject record disappeared
    /// - `SubjectAlreadyClaimed` when another booking won the race
    /// - `DatabaseError` on persistence failure
    async fn book(&self, new: &NewClaim) -> Result<ClaimId, DomainError>;

    /// Cancels a scheduled booking owned by `owner`.
    ///
    /// Returns false when no scheduled booking with that id belongs to the
    /// owner; ids belonging to other subscribers are indistinguishable from
    /// missing ones.
    async fn cancel(&self, claim_id: ClaimId, owner: SubscriberId) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ClaimRepository) {}
    }
}
