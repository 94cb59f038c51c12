//! Claim reader port (read side).

use async_trait::async_trait;

use crate::domain::claim::Claim;
use crate::domain::foundation::{ClaimId, DomainError, SubscriberId};

/// Owner-scoped read access to bookings.
///
/// Every query takes the requesting owner; a claim id belonging to another
/// subscriber reads back as absent.
#[async_trait]
pub trait ClaimReader: Send + Sync {
    /// Finds one booking by id, scoped to its owner.
    async fn find_for_owner(
        &self,
        claim_id: ClaimId,
        owner: SubscriberId,
    ) -> Result<Option<Claim>, DomainError>;

    /// Most recent bookings for the owner, newest first.
    async fn history_for_owner(
        &self,
        owner: SubscriberId,
        limit: u32,
    ) -> Result<Vec<Claim>, DomainError>;
}
