//! Session position port.
//!
//! Two session-tracking strategies exist in the field: a level integer
//! persisted per session id, and a stateless variant deriving the level
//! from the resubmitted input trail. This port hides the choice from the
//! menu state machine; one adapter per strategy lives under
//! `adapters::position`.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::menu::InputTrail;

/// Where the subscriber currently is in the menu, however tracked.
#[async_trait]
pub trait SessionPosition: Send + Sync {
    /// Current level; 0 means fresh session (show the root menu).
    async fn current(
        &self,
        session_id: &SessionId,
        trail: &InputTrail,
    ) -> Result<u32, DomainError>;

    /// Claims the advance from `expected` to `next` for this turn.
    ///
    /// Returns false when another delivery of the same turn already claimed
    /// it; the caller must then skip the turn's domain effect. Stateless
    /// implementations always return true and lean on database-level
    /// guards instead.
    async fn try_advance(
        &self,
        session_id: &SessionId,
        expected: u32,
        next: u32,
    ) -> Result<bool, DomainError>;

    /// Records that the root menu was shown (level 1).
    async fn reset(&self, session_id: &SessionId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_position_is_object_safe() {
        fn _accepts_dyn(_position: &dyn SessionPosition) {}
    }
}
