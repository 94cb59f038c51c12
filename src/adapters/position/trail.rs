//! Stateless session position derived from the input trail.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::menu::InputTrail;
use crate::ports::SessionPosition;

/// Position strategy with no storage at all.
///
/// The level is `1 + turns taken`, read straight off the trail the
/// gateway resubmits each callback. Every advance is granted, so
/// at-most-once effects fall entirely on the database guards (the
/// conditional subject flip, the unique phone key).
pub struct TrailPosition;

#[async_trait]
impl SessionPosition for TrailPosition {
    async fn current(
        &self,
        _session_id: &SessionId,
        trail: &InputTrail,
    ) -> Result<u32, DomainError> {
        if trail.is_empty() {
            Ok(0)
        } else {
            Ok(trail.turns() as u32 + 1)
        }
    }

    async fn try_advance(
        &self,
        _session_id: &SessionId,
        _expected: u32,
        _next: u32,
    ) -> Result<bool, DomainError> {
        Ok(true)
    }

    async fn reset(&self, _session_id: &SessionId) -> Result<(), DomainError> {
        Ok(())
    }
}
