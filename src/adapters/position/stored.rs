//! Stored session position, backed by a [`SessionStore`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::menu::InputTrail;
use crate::ports::{SessionPosition, SessionStore};

/// Position strategy that persists one level integer per session.
///
/// The trail is ignored for reads; the store is the source of freshness
/// and its atomic advance is the duplicate-delivery barrier.
pub struct StoredPosition {
    store: Arc<dyn SessionStore>,
}

impl StoredPosition {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SessionPosition for StoredPosition {
    async fn current(
        &self,
        session_id: &SessionId,
        _trail: &InputTrail,
    ) -> Result<u32, DomainError> {
        self.store.level(session_id).await
    }

    async fn try_advance(
        &self,
        session_id: &SessionId,
        expected: u32,
        next: u32,
    ) -> Result<bool, DomainError> {
        self.store.try_advance(session_id, expected, next).await
    }

    async fn reset(&self, session_id: &SessionId) -> Result<(), DomainError> {
        self.store.reset(session_id).await
    }
}
